use thiserror::Error;

/// Returned when a [`BitReader`](crate::BitReader) runs out of bits or reads
/// a value that cannot be represented by the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Failed to deserialize value from bit stream")]
pub struct SerdeErr;
