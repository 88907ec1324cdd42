use crate::error::SerdeErr;

/// Reads values back out of a buffer produced by a [`BitWriter`](crate::BitWriter).
pub struct BitReader<'b> {
    buffer: &'b [u8],
    bit_position: usize,
}

impl<'b> BitReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self {
            buffer,
            bit_position: 0,
        }
    }

    pub fn read_bit(&mut self) -> Result<bool, SerdeErr> {
        let byte = self
            .buffer
            .get(self.bit_position >> 3)
            .ok_or(SerdeErr)?;
        let bit = (byte >> (self.bit_position & 7)) & 1 != 0;
        self.bit_position += 1;
        Ok(bit)
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        if self.bit_position & 7 == 0 {
            let byte = *self.buffer.get(self.bit_position >> 3).ok_or(SerdeErr)?;
            self.bit_position += 8;
            return Ok(byte);
        }

        let mut output: u8 = 0;
        for index in 0..8 {
            if self.read_bit()? {
                output |= 1 << index;
            }
        }
        Ok(output)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<Vec<u8>, SerdeErr> {
        if count > self.bytes_remaining() {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(count);
        for _ in 0..count {
            output.push(self.read_byte()?);
        }
        Ok(output)
    }

    /// Skips to the next byte boundary, mirroring `BitWrite::write_pad_bits`.
    pub fn skip_pad_bits(&mut self) {
        let remainder = self.bit_position & 7;
        if remainder != 0 {
            self.bit_position += 8 - remainder;
        }
    }

    /// Whole bytes left to read, not counting a partially consumed byte.
    pub fn bytes_remaining(&self) -> usize {
        let total_bits = self.buffer.len() * 8;
        total_bits.saturating_sub(self.bit_position) / 8
    }

    pub fn bits_read(&self) -> usize {
        self.bit_position
    }
}
