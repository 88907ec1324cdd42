mod error;

pub use error::{DisconnectAction, TransportError};

use std::net::SocketAddr;

use flotilla_shared::{ChannelIndex, DeliveryClass};

/// The datagram transport underneath the connection gateway. Handshake,
/// encryption and retransmission all live behind this trait.
pub trait Transport: Send {
    fn is_running(&self) -> bool;
    fn start(&mut self) -> Result<(), TransportError>;
    fn connect(&mut self, address: SocketAddr) -> Result<(), TransportError>;
    /// Fire-and-forget send that does not require an established connection
    fn send_unconnected(
        &mut self,
        bytes: &[u8],
        destinations: &[SocketAddr],
    ) -> Result<(), TransportError>;
    fn send(
        &mut self,
        bytes: &[u8],
        delivery: DeliveryClass,
        channel: ChannelIndex,
    ) -> Result<(), TransportError>;
    /// Forces buffered sends out
    fn flush(&mut self) -> Result<(), TransportError>;
}
