use thiserror::Error;

/// Errors raised by a [`Transport`](super::Transport)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The remote end reset or closed the connection
    #[error("Connection reset by peer: {reason}")]
    ConnectionReset { reason: String },

    /// The underlying socket failed
    #[error("Socket fault: {reason}")]
    SocketFault { reason: String },

    /// A send did not complete in time
    #[error("Transport operation timed out")]
    Timeout,

    /// The transport was used before being started
    #[error("Transport is not running")]
    NotRunning,

    /// The transport refused a single message, the connection is unaffected
    #[error("Transport rejected message: {reason}")]
    Rejected { reason: String },
}

/// What the gateway does about a [`TransportError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisconnectAction {
    /// Drop to `Disconnected` and ask the owner to reconnect
    Reconnect,
    /// Transient, log and carry on
    LogOnly,
}

impl TransportError {
    pub fn disconnect_action(&self) -> DisconnectAction {
        match self {
            TransportError::ConnectionReset { .. }
            | TransportError::SocketFault { .. }
            | TransportError::NotRunning => DisconnectAction::Reconnect,
            TransportError::Timeout | TransportError::Rejected { .. } => DisconnectAction::LogOnly,
        }
    }
}
