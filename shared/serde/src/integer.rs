use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength};

pub type UnsignedInteger<const BITS: u8> = SerdeInteger<false, false, BITS>;
pub type SignedInteger<const BITS: u8> = SerdeInteger<true, false, BITS>;
pub type UnsignedVariableInteger<const BITS: u8> = SerdeInteger<false, true, BITS>;
pub type SignedVariableInteger<const BITS: u8> = SerdeInteger<true, true, BITS>;

/// An integer written with a fixed number of bits, or (when `VARIABLE`) in
/// `BITS`-sized groups each preceded by a continuation bit.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct SerdeInteger<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> {
    value: i128,
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> SerdeInteger<SIGNED, VARIABLE, BITS> {
    /// Returns `None` if `value` cannot be represented with this encoding.
    pub fn try_new<T: Into<i128>>(value: T) -> Option<Self> {
        let value = value.into();
        if BITS == 0 || BITS > 127 {
            return None;
        }
        if !SIGNED && value < 0 {
            return None;
        }
        if !VARIABLE && value.unsigned_abs() >= 1u128 << BITS {
            return None;
        }
        Some(Self { value })
    }

    /// # Panics
    /// Panics if `value` does not fit the encoding.
    /// For non-panicking version, use `try_new`.
    pub fn new<T: Into<i128>>(value: T) -> Self {
        Self::try_new(value).expect("value does not fit in this SerdeInteger encoding")
    }

    pub fn get(&self) -> i128 {
        self.value
    }

    fn magnitude_bits(mut magnitude: u128) -> u32 {
        if !VARIABLE {
            return BITS as u32;
        }
        let mut output = 0;
        loop {
            output += 1 + BITS as u32;
            magnitude >>= BITS;
            if magnitude == 0 {
                return output;
            }
        }
    }
}

impl<const SIGNED: bool, const VARIABLE: bool, const BITS: u8> Serde for SerdeInteger<SIGNED, VARIABLE, BITS> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        if SIGNED {
            writer.write_bit(self.value < 0);
        }

        let mut magnitude = self.value.unsigned_abs();

        if VARIABLE {
            loop {
                let proceed = magnitude >> BITS != 0;
                writer.write_bit(proceed);
                for _ in 0..BITS {
                    writer.write_bit(magnitude & 1 != 0);
                    magnitude >>= 1;
                }
                if !proceed {
                    return;
                }
            }
        }

        for _ in 0..BITS {
            writer.write_bit(magnitude & 1 != 0);
            magnitude >>= 1;
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let negative = SIGNED && reader.read_bit()?;

        let mut magnitude: u128 = 0;
        let mut shift: u32 = 0;

        if VARIABLE {
            loop {
                let proceed = reader.read_bit()?;
                for _ in 0..BITS {
                    if reader.read_bit()? {
                        if shift >= 127 {
                            return Err(SerdeErr);
                        }
                        magnitude |= 1u128 << shift;
                    }
                    shift += 1;
                }
                if !proceed {
                    break;
                }
            }
        } else {
            for _ in 0..BITS {
                if reader.read_bit()? {
                    magnitude |= 1u128 << shift;
                }
                shift += 1;
            }
        }

        let value = i128::try_from(magnitude).map_err(|_| SerdeErr)?;
        Ok(Self {
            value: if negative { -value } else { value },
        })
    }

    fn bit_length(&self) -> u32 {
        let sign = if SIGNED { 1 } else { 0 };
        sign + Self::magnitude_bits(self.value.unsigned_abs())
    }
}

impl<const SIGNED: bool, const BITS: u8> ConstBitLength for SerdeInteger<SIGNED, false, BITS> {
    fn const_bit_length() -> u32 {
        let sign = if SIGNED { 1 } else { 0 };
        sign + BITS as u32
    }
}
