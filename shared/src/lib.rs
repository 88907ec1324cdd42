//! # Flotilla Shared
//! Envelopes, message payloads and vessel snapshots shared between the
//! flotilla client and the peers it synchronizes with.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use flotilla_serde::{
    bytes_for_bits, BitCounter, BitReader, BitWrite, BitWriter, ConstBitLength, Serde, SerdeErr,
    SignedInteger, SignedVariableInteger, UnsignedInteger, UnsignedVariableInteger,
};

mod backends;
mod connection;
mod messages;
mod types;
mod vessel;

pub use backends::{TimeError, Timestamp};
pub use connection::{
    compression_config::{CompressionConfig, CompressionMode},
    decoder::Decoder,
    encoder::Encoder,
    error::{DecoderError, EncoderError},
};
pub use messages::{
    codec::Codec,
    data::{
        handshake_reply::{HandshakeReply, HandshakeReplyMsgData},
        master_server::MasterServerIntroductionMsgData,
        sync_time::SyncTimeRequestMsgData,
        vessel_proto::VesselProtoMsgData,
        vessel_remove::VesselRemoveMsgData,
        MessageData,
    },
    delivery::DeliveryClass,
    envelope::Envelope,
    error::CodecError,
    message_kind::MessageKind,
};
pub use types::{ChannelIndex, Subspace, VesselId};
pub use vessel::proto::{Position, ProtoPart, ProtoVessel, VesselType};
