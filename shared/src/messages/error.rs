use thiserror::Error;

use flotilla_serde::SerdeErr;

use crate::{DecoderError, EncoderError};

/// Errors produced while turning envelopes into bytes or back. These are
/// always local to one message: the caller logs and drops it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Ran out of bytes or read an invalid field value
    #[error("Malformed or truncated {stage} ({byte_len} bytes)")]
    Malformed {
        stage: &'static str,
        byte_len: usize,
    },

    /// Header carried a message kind this build does not know
    #[error("Unknown message kind {kind}. This may indicate a malformed packet or a protocol mismatch")]
    InvalidMessageKind {
        kind: u8,
    },

    /// Payload was fully read but whole bytes remained
    #[error("{count} unexpected trailing bytes after {kind} payload")]
    TrailingBytes {
        kind: &'static str,
        count: usize,
    },

    /// Compression transform failed
    #[error("Encoder error: {0}")]
    Encoder(#[from] EncoderError),

    /// Decompression transform failed
    #[error("Decoder error: {0}")]
    Decoder(#[from] DecoderError),
}

impl CodecError {
    pub(crate) fn malformed(stage: &'static str, byte_len: usize) -> impl FnOnce(SerdeErr) -> Self {
        move |_| CodecError::Malformed { stage, byte_len }
    }
}
