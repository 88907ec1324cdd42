use crate::{
    bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, ConstBitLength,
    UnsignedVariableInteger,
};

// Booleans take a single bit. Callers close a run of them with pad bits.

impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_bit(*self);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        reader.read_bit()
    }

    fn bit_length(&self) -> u32 {
        1
    }
}

impl ConstBitLength for bool {
    fn const_bit_length() -> u32 {
        1
    }
}

// Fixed-width numbers are written as little-endian bytes.

macro_rules! impl_serde_le_bytes {
    ($($ty:ty),*) => {
        $(
            impl Serde for $ty {
                fn ser(&self, writer: &mut dyn BitWrite) {
                    writer.write_bytes(&self.to_le_bytes());
                }

                fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                    let mut bytes = [0u8; std::mem::size_of::<$ty>()];
                    for byte in bytes.iter_mut() {
                        *byte = reader.read_byte()?;
                    }
                    Ok(<$ty>::from_le_bytes(bytes))
                }

                fn bit_length(&self) -> u32 {
                    <$ty as ConstBitLength>::const_bit_length()
                }
            }

            impl ConstBitLength for $ty {
                fn const_bit_length() -> u32 {
                    8 * std::mem::size_of::<$ty>() as u32
                }
            }
        )*
    };
}

impl_serde_le_bytes!(u8, u16, u32, u64, u128, i8, i16, i32, i64, f32, f64);

// Strings and sequences carry a variable-length count.

type LengthPrefix = UnsignedVariableInteger<7>;

impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        LengthPrefix::new(self.len() as u64).ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = usize::try_from(LengthPrefix::de(reader)?.get()).map_err(|_| SerdeErr)?;
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes).map_err(|_| SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        LengthPrefix::new(self.len() as u64).bit_length() + 8 * self.len() as u32
    }
}

impl<T: Serde> Serde for Vec<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        LengthPrefix::new(self.len() as u64).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = usize::try_from(LengthPrefix::de(reader)?.get()).map_err(|_| SerdeErr)?;
        // every element takes at least one bit
        if length > reader.bytes_remaining() * 8 + 8 {
            return Err(SerdeErr);
        }
        let mut output = Vec::with_capacity(length);
        for _ in 0..length {
            output.push(T::de(reader)?);
        }
        Ok(output)
    }
}

impl<T: Serde> Serde for Option<T> {
    fn ser(&self, writer: &mut dyn BitWrite) {
        match self {
            Some(value) => {
                writer.write_bit(true);
                value.ser(writer);
            }
            None => writer.write_bit(false),
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        if reader.read_bit()? {
            Ok(Some(T::de(reader)?))
        } else {
            Ok(None)
        }
    }
}
