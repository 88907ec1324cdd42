use thiserror::Error;

use flotilla_shared::CodecError;

use crate::transport::TransportError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("Unable to build the codec: {0}")]
    Codec(#[from] CodecError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Unable to spawn the sender thread: {reason}")]
    SpawnFailed { reason: String },

    /// The sender loop consumes the queue's receiving end, so a client can
    /// only be started once
    #[error("Client has already been started")]
    AlreadyStarted,
}
