/// Sink for bit-level serialization.
pub trait BitWrite {
    fn write_bit(&mut self, bit: bool);
    fn write_byte(&mut self, byte: u8);
    /// Total bits written so far, used to compute pad bits.
    fn bits_written(&self) -> u32;

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }

    /// Writes zero bits until the stream sits on a byte boundary.
    fn write_pad_bits(&mut self) {
        while self.bits_written() % 8 != 0 {
            self.write_bit(false);
        }
    }
}

/// Growable bit writer. Unlike an MTU-bound packet writer it accepts
/// payloads of any size, since vessel definitions can be large.
pub struct BitWriter {
    scratch: u8,
    scratch_index: u8,
    buffer: Vec<u8>,
    bits_written: u32,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            scratch: 0,
            scratch_index: 0,
            buffer: Vec::with_capacity(bytes),
            bits_written: 0,
        }
    }

    fn flush_scratch(&mut self) {
        if self.scratch_index > 0 {
            let byte = (self.scratch << (8 - self.scratch_index)).reverse_bits();
            self.buffer.push(byte);
            self.scratch = 0;
            self.scratch_index = 0;
        }
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.flush_scratch();
        self.buffer
    }
}

impl Default for BitWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitWrite for BitWriter {
    fn write_bit(&mut self, bit: bool) {
        self.scratch <<= 1;

        if bit {
            self.scratch |= 1;
        }

        self.scratch_index += 1;
        self.bits_written += 1;

        if self.scratch_index >= 8 {
            self.buffer.push(self.scratch.reverse_bits());
            self.scratch_index = 0;
            self.scratch = 0;
        }
    }

    fn write_byte(&mut self, byte: u8) {
        if self.scratch_index == 0 {
            self.buffer.push(byte);
            self.bits_written += 8;
            return;
        }

        let mut temp = byte;
        for _ in 0..8 {
            self.write_bit(temp & 1 != 0);
            temp >>= 1;
        }
    }

    fn bits_written(&self) -> u32 {
        self.bits_written
    }
}

/// Counts the bits a value would occupy without allocating. Pad bits are
/// counted relative to the running total, so a value measured from zero
/// matches its size when written from any byte boundary.
#[derive(Default)]
pub struct BitCounter {
    bits: u32,
}

impl BitCounter {
    pub fn new() -> Self {
        Self { bits: 0 }
    }

    pub fn bytes_needed(&self) -> usize {
        crate::bytes_for_bits(self.bits)
    }
}

impl BitWrite for BitCounter {
    fn write_bit(&mut self, _: bool) {
        self.bits += 1;
    }

    fn write_byte(&mut self, _: u8) {
        self.bits += 8;
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.bits += 8 * bytes.len() as u32;
    }

    fn bits_written(&self) -> u32 {
        self.bits
    }
}
