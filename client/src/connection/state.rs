use std::sync::{
    atomic::{AtomicBool, AtomicU8, Ordering},
    Arc,
};

/// Connection lifecycle. Ordered, so `state >= Connected` reads naturally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    fn to_u8(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connecting => 1,
            ConnectionState::Connected => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => ConnectionState::Connecting,
            2 => ConnectionState::Connected,
            _ => ConnectionState::Disconnected,
        }
    }
}

/// Shared view of the connection state. The sender loop reads it on every
/// send while the receive path moves it forward on handshake replies.
#[derive(Clone, Debug)]
pub struct ConnectionStateHandle {
    state: Arc<AtomicU8>,
    reconnect_requested: Arc<AtomicBool>,
}

impl ConnectionStateHandle {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(ConnectionState::Disconnected.to_u8())),
            reconnect_requested: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn get(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn set(&self, state: ConnectionState) {
        self.state.store(state.to_u8(), Ordering::Release);
    }

    pub fn is_connected(&self) -> bool {
        self.get() >= ConnectionState::Connected
    }

    pub(crate) fn request_reconnect(&self) {
        self.reconnect_requested.store(true, Ordering::Release);
    }

    /// Returns true once per reconnect request raised by the gateway
    pub fn take_reconnect_request(&self) -> bool {
        self.reconnect_requested.swap(false, Ordering::AcqRel)
    }
}

impl Default for ConnectionStateHandle {
    fn default() -> Self {
        Self::new()
    }
}
