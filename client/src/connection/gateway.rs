use std::{net::SocketAddr, sync::Arc};

use log::{debug, error, info, trace, warn};
use parking_lot::Mutex;

use flotilla_shared::Envelope;

use crate::{
    connection::{
        network_statistics::NetworkStatistics,
        state::{ConnectionState, ConnectionStateHandle},
    },
    transport::{DisconnectAction, Transport, TransportError},
};

/// What happened to an envelope handed to [`ConnectionGateway::send`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendOutcome {
    /// Sent over the established connection
    Sent,
    /// Sent unconnected to this many rendezvous endpoints
    SentUnconnected(usize),
    /// Not connected yet, silently dropped
    Dropped,
}

/// Thin facade over the transport. Cloning yields another handle to the
/// same transport, so the owner can connect while the sender loop sends.
#[derive(Clone)]
pub struct ConnectionGateway {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    state: ConnectionStateHandle,
    master_servers: Arc<[SocketAddr]>,
    statistics: NetworkStatistics,
}

impl ConnectionGateway {
    pub fn new(
        transport: Box<dyn Transport>,
        state: ConnectionStateHandle,
        master_servers: Vec<SocketAddr>,
        statistics: NetworkStatistics,
    ) -> Self {
        Self {
            transport: Arc::new(Mutex::new(transport)),
            state,
            master_servers: master_servers.into(),
            statistics,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn state_handle(&self) -> &ConnectionStateHandle {
        &self.state
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        &self.statistics
    }

    /// Starts the transport if it is not running yet. Idempotent.
    pub fn ensure_started(&self) -> Result<(), TransportError> {
        let mut transport = self.transport.lock();
        if !transport.is_running() {
            transport.start()?;
            info!("Transport started");
        }
        Ok(())
    }

    /// Begins connecting to `address`. The receive path moves the state to
    /// `Connected` once the server's handshake reply arrives.
    pub fn connect(&self, address: SocketAddr) -> Result<(), TransportError> {
        self.ensure_started()?;
        self.state.set(ConnectionState::Connecting);
        info!("Connecting to {}", address);

        if let Err(err) = self.transport.lock().connect(address) {
            self.state.set(ConnectionState::Disconnected);
            return Err(err);
        }
        Ok(())
    }

    pub fn send(&self, envelope: &Envelope, bytes: &[u8]) -> Result<SendOutcome, TransportError> {
        self.ensure_started()?;

        if envelope.is_master_server() {
            if self.master_servers.is_empty() {
                debug!("No master servers configured, dropping {:?}", envelope.kind());
                return Ok(SendOutcome::Dropped);
            }
            self.transport
                .lock()
                .send_unconnected(bytes, &self.master_servers)?;
            self.statistics.record_send(envelope.sent_time());
            return Ok(SendOutcome::SentUnconnected(self.master_servers.len()));
        }

        if !self.state.is_connected() {
            trace!("Not connected, dropping {:?}", envelope.kind());
            return Ok(SendOutcome::Dropped);
        }

        self.transport
            .lock()
            .send(bytes, envelope.delivery(), envelope.channel())?;
        self.statistics.record_send(envelope.sent_time());
        Ok(SendOutcome::Sent)
    }

    pub fn flush(&self) -> Result<(), TransportError> {
        let mut transport = self.transport.lock();
        if !transport.is_running() {
            return Ok(());
        }
        transport.flush()
    }

    /// Classifies a transport failure. Reconnect-worthy errors drop the
    /// connection state and raise a reconnect request for the owner.
    pub fn handle_transport_error(&self, err: &TransportError) -> DisconnectAction {
        let action = err.disconnect_action();
        match action {
            DisconnectAction::Reconnect => {
                error!("Lost connection: {}", err);
                self.state.set(ConnectionState::Disconnected);
                self.state.request_reconnect();
            }
            DisconnectAction::LogOnly => {
                warn!("Transient transport error: {}", err);
            }
        }
        action
    }
}
