use std::{sync::Arc, time::Instant};

use log::{debug, info, warn};

use flotilla_shared::{
    Codec, CodecError, CompressionConfig, Envelope, HandshakeReply, HandshakeReplyMsgData,
    MessageData, VesselId,
};

use crate::{
    connection::{ConnectionState, ConnectionStateHandle},
    world::{RemovalCoordinator, VesselStore},
};

/// What an inbound message did
#[derive(Debug)]
pub enum InboundEvent {
    /// A definition landed in the store
    VesselUpdated(VesselId),
    /// A definition for a kill-listed or just-destroyed vessel was discarded
    VesselIgnored(VesselId),
    /// A vessel was scheduled for removal
    VesselRemoved(VesselId),
    Handshake(HandshakeReplyMsgData),
    /// Messages this core does not act on
    Other { data: MessageData, sent_time: i64 },
}

/// Receive path: decodes bytes from the transport and lands them in the
/// store, the kill list or the connection state.
pub struct InboundHandler {
    codec: Codec,
    store: Arc<VesselStore>,
    removal: Arc<RemovalCoordinator>,
    state: ConnectionStateHandle,
}

impl InboundHandler {
    pub fn try_new(
        compression: &CompressionConfig,
        store: Arc<VesselStore>,
        removal: Arc<RemovalCoordinator>,
        state: ConnectionStateHandle,
    ) -> Result<Self, CodecError> {
        Ok(Self {
            codec: Codec::try_new(compression)?,
            store,
            removal,
            state,
        })
    }

    /// Like [`InboundHandler::try_receive`], but malformed input is logged
    /// and dropped.
    pub fn receive(&mut self, bytes: &[u8], now: Instant) -> Option<InboundEvent> {
        match self.try_receive(bytes, now) {
            Ok(event) => Some(event),
            Err(err) => {
                warn!("Dropping inbound message: {}", err);
                None
            }
        }
    }

    pub fn try_receive(&mut self, bytes: &[u8], now: Instant) -> Result<InboundEvent, CodecError> {
        let envelope = self.codec.deserialize(bytes)?;
        Ok(self.handle(envelope, now))
    }

    fn handle(&mut self, envelope: Envelope, now: Instant) -> InboundEvent {
        let sent_time = envelope.sent_time();
        match envelope.into_data() {
            MessageData::VesselProto(data) => {
                let vessel_id = data.vessel.vessel_id;
                if self.removal.is_scheduled(vessel_id)
                    || self.removal.was_recently_removed(vessel_id, now)
                {
                    debug!("Ignoring definition of removed vessel {}", vessel_id);
                    return InboundEvent::VesselIgnored(vessel_id);
                }
                self.store.handle_proto_update(data.vessel, now);
                InboundEvent::VesselUpdated(vessel_id)
            }
            MessageData::VesselRemove(data) => {
                if data.add_to_kill_list {
                    self.removal.add(data.vessel_id);
                } else {
                    self.removal.add_transient(data.vessel_id);
                }
                InboundEvent::VesselRemoved(data.vessel_id)
            }
            MessageData::HandshakeReply(data) => {
                if data.response == HandshakeReply::Handshook {
                    info!("Handshake accepted, player id {}", data.player_id);
                    self.state.set(ConnectionState::Connected);
                } else {
                    warn!("Handshake refused ({:?}): {}", data.response, data.reason);
                    self.state.set(ConnectionState::Disconnected);
                }
                InboundEvent::Handshake(data)
            }
            data => InboundEvent::Other { data, sent_time },
        }
    }
}
