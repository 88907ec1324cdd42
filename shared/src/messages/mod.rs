pub mod codec;
pub mod data;
pub mod delivery;
pub mod envelope;
pub mod error;
pub mod message_kind;
