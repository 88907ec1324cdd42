use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, BitCounter};

/// A value that can be written to and read from a bit stream.
///
/// `bit_length` must equal the number of bits `ser` writes when starting from
/// a byte boundary. The provided implementation measures it with a
/// [`BitCounter`]; fixed-size types override it with a constant.
pub trait Serde: Sized + Clone + PartialEq {
    fn ser(&self, writer: &mut dyn BitWrite);

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr>;

    fn bit_length(&self) -> u32 {
        let mut counter = BitCounter::new();
        self.ser(&mut counter);
        counter.bits_written()
    }
}

pub trait ConstBitLength {
    fn const_bit_length() -> u32;
}
