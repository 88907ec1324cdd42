//! # Flotilla Serde
//! Bit-level serialization for flotilla envelopes and vessel snapshots.
//!
//! Values are written least-significant bit first. Boolean runs may be
//! closed with [`BitWrite::write_pad_bits`] so that the following field
//! starts on a byte boundary; the reader mirrors this with
//! [`BitReader::skip_pad_bits`].

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod integer;
mod serde;

pub use bit_reader::BitReader;
pub use bit_writer::{BitCounter, BitWrite, BitWriter};
pub use error::SerdeErr;
pub use integer::{
    SerdeInteger, SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};
pub use serde::{ConstBitLength, Serde};

/// Number of whole bytes needed to hold `bits` bits.
pub fn bytes_for_bits(bits: u32) -> usize {
    ((bits + 7) / 8) as usize
}
