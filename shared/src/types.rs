use std::fmt;

use flotilla_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

pub type Subspace = i32;
pub type ChannelIndex = u8;

/// Globally unique vessel identifier, shared by every participant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VesselId(u128);

impl VesselId {
    pub const fn from_u128(value: u128) -> Self {
        Self(value)
    }

    pub const fn to_u128(self) -> u128 {
        self.0
    }

    pub fn is_nil(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (v >> 96) as u32,
            (v >> 80) as u16,
            (v >> 64) as u16,
            (v >> 48) as u16,
            v & 0xFFFF_FFFF_FFFF,
        )
    }
}

impl Serde for VesselId {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self(u128::de(reader)?))
    }

    fn bit_length(&self) -> u32 {
        <Self as ConstBitLength>::const_bit_length()
    }
}

impl ConstBitLength for VesselId {
    fn const_bit_length() -> u32 {
        <u128 as ConstBitLength>::const_bit_length()
    }
}
