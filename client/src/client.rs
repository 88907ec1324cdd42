use std::{net::SocketAddr, sync::Arc, thread::JoinHandle, time::Instant};

use log::{info, warn};

use flotilla_shared::{Codec, VesselId};

use crate::{
    client_config::ClientConfig,
    connection::{ConnectionGateway, ConnectionState, ConnectionStateHandle, NetworkStatistics},
    error::ClientError,
    inbound::{InboundEvent, InboundHandler},
    sender::{dispatch_queue, DispatchQueue, ResetSignal, SenderLoop, SenderReport},
    sync::{SyncContext, VesselProtoSystem},
    transport::Transport,
    world::{Host, VesselStatus, VesselStore},
};

/// Wires the sender loop, the receive path and the vessel routines around
/// one transport. The host feeds it inbound bytes and calls
/// [`SyncClient::tick`] once per frame.
pub struct SyncClient {
    gateway: ConnectionGateway,
    proto_system: VesselProtoSystem,
    inbound: InboundHandler,
    reset: ResetSignal,
    sender: Option<SenderLoop>,
    sender_handle: Option<JoinHandle<SenderReport>>,
}

impl SyncClient {
    pub fn try_new(config: ClientConfig, transport: Box<dyn Transport>) -> Result<Self, ClientError> {
        let (queue, receiver) = dispatch_queue();
        let state = ConnectionStateHandle::new();
        let gateway = ConnectionGateway::new(
            transport,
            state.clone(),
            config.connection.master_servers.clone(),
            NetworkStatistics::new(),
        );
        let reset = ResetSignal::new();

        let context = SyncContext::new(config.sync.clone(), queue);
        let inbound = InboundHandler::try_new(
            &config.connection.compression,
            context.store.clone(),
            context.removal.clone(),
            state,
        )?;
        let sender = SenderLoop::new(
            receiver,
            gateway.clone(),
            Codec::try_new(&config.connection.compression)?,
            reset.clone(),
            config.connection.send_receive_interval,
        );

        Ok(Self {
            gateway,
            proto_system: VesselProtoSystem::new(context),
            inbound,
            reset,
            sender: Some(sender),
            sender_handle: None,
        })
    }

    /// Spawns the sender loop and enables vessel synchronization
    pub fn start(&mut self) -> Result<(), ClientError> {
        let sender = self.sender.take().ok_or(ClientError::AlreadyStarted)?;
        let handle = sender.spawn().map_err(|err| ClientError::SpawnFailed {
            reason: err.to_string(),
        })?;
        self.sender_handle = Some(handle);
        self.proto_system.enable();
        Ok(())
    }

    pub fn connect(&self, address: SocketAddr) -> Result<(), ClientError> {
        self.gateway.connect(address)?;
        Ok(())
    }

    pub fn tick(&mut self, host: &mut Host<'_>, now: Instant) {
        self.proto_system.tick(host, now);
    }

    pub fn receive(&mut self, bytes: &[u8], now: Instant) -> Option<InboundEvent> {
        self.inbound.receive(bytes, now)
    }

    pub fn queue(&self) -> &DispatchQueue {
        &self.proto_system.context().queue
    }

    pub fn store(&self) -> &Arc<VesselStore> {
        &self.proto_system.context().store
    }

    pub fn vessel_status(&self) -> Vec<(VesselId, VesselStatus)> {
        self.store().statuses()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.gateway.state()
    }

    /// Also carries the reconnect request raised when the transport drops
    pub fn state_handle(&self) -> &ConnectionStateHandle {
        self.gateway.state_handle()
    }

    pub fn statistics(&self) -> &NetworkStatistics {
        self.gateway.statistics()
    }

    pub fn proto_system(&self) -> &VesselProtoSystem {
        &self.proto_system
    }

    pub fn proto_system_mut(&mut self) -> &mut VesselProtoSystem {
        &mut self.proto_system
    }

    pub fn profiler_report(&self) -> String {
        self.proto_system.profiler_report()
    }

    /// Stops the sender loop, waits for it, and tears down vessel state.
    /// Returns the loop's counters if it was running.
    pub fn shutdown(&mut self) -> Option<SenderReport> {
        self.reset.request();
        self.proto_system.disable();
        let handle = self.sender_handle.take()?;
        match handle.join() {
            Ok(report) => {
                info!("Client shut down");
                Some(report)
            }
            Err(_) => {
                warn!("Sender loop panicked");
                None
            }
        }
    }
}

impl Drop for SyncClient {
    fn drop(&mut self) {
        self.reset.request();
    }
}
