pub mod handshake_reply;
pub mod master_server;
pub mod sync_time;
pub mod vessel_proto;
pub mod vessel_remove;

use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::{
    messages::{delivery::DeliveryClass, message_kind::MessageKind},
    types::ChannelIndex,
};

use handshake_reply::HandshakeReplyMsgData;
use master_server::MasterServerIntroductionMsgData;
use sync_time::SyncTimeRequestMsgData;
use vessel_proto::VesselProtoMsgData;
use vessel_remove::VesselRemoveMsgData;

// Vessel definitions and removals share a lane so a removal can never
// overtake the definition it cancels.
const VESSEL_CHANNEL: ChannelIndex = 8;
const HANDSHAKE_CHANNEL: ChannelIndex = 1;
const DEFAULT_CHANNEL: ChannelIndex = 0;

/// Typed payload carried by an [`Envelope`](crate::Envelope).
#[derive(Clone, Debug, PartialEq)]
pub enum MessageData {
    VesselProto(VesselProtoMsgData),
    VesselRemove(VesselRemoveMsgData),
    HandshakeReply(HandshakeReplyMsgData),
    SyncTimeRequest(SyncTimeRequestMsgData),
    MasterServerIntroduction(MasterServerIntroductionMsgData),
}

impl MessageData {
    pub fn kind(&self) -> MessageKind {
        match self {
            MessageData::VesselProto(_) => MessageKind::VesselProto,
            MessageData::VesselRemove(_) => MessageKind::VesselRemove,
            MessageData::HandshakeReply(_) => MessageKind::HandshakeReply,
            MessageData::SyncTimeRequest(_) => MessageKind::SyncTimeRequest,
            MessageData::MasterServerIntroduction(_) => MessageKind::MasterServerIntroduction,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageData::VesselProto(_) => "VesselProtoMsgData",
            MessageData::VesselRemove(_) => "VesselRemoveMsgData",
            MessageData::HandshakeReply(_) => "HandshakeReplyMsgData",
            MessageData::SyncTimeRequest(_) => "SyncTimeRequestMsgData",
            MessageData::MasterServerIntroduction(_) => "MasterServerIntroductionMsgData",
        }
    }

    pub fn default_delivery(&self) -> (DeliveryClass, ChannelIndex) {
        match self {
            MessageData::VesselProto(_) | MessageData::VesselRemove(_) => {
                (DeliveryClass::ReliableOrdered, VESSEL_CHANNEL)
            }
            MessageData::HandshakeReply(_) => (DeliveryClass::ReliableOrdered, HANDSHAKE_CHANNEL),
            MessageData::SyncTimeRequest(_) | MessageData::MasterServerIntroduction(_) => {
                (DeliveryClass::BestEffort, DEFAULT_CHANNEL)
            }
        }
    }

    /// Writes the type-specific fields, in declared order.
    pub fn ser_payload(&self, writer: &mut dyn BitWrite) {
        match self {
            MessageData::VesselProto(data) => data.ser(writer),
            MessageData::VesselRemove(data) => data.ser(writer),
            MessageData::HandshakeReply(data) => data.ser(writer),
            MessageData::SyncTimeRequest(data) => data.ser(writer),
            MessageData::MasterServerIntroduction(data) => data.ser(writer),
        }
    }

    pub fn de_payload(kind: MessageKind, reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(match kind {
            MessageKind::VesselProto => MessageData::VesselProto(Serde::de(reader)?),
            MessageKind::VesselRemove => MessageData::VesselRemove(Serde::de(reader)?),
            MessageKind::HandshakeReply => MessageData::HandshakeReply(Serde::de(reader)?),
            MessageKind::SyncTimeRequest => MessageData::SyncTimeRequest(Serde::de(reader)?),
            MessageKind::MasterServerIntroduction => {
                MessageData::MasterServerIntroduction(Serde::de(reader)?)
            }
        })
    }
}
