use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Discriminant written at the head of every envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MessageKind {
    VesselProto,
    VesselRemove,
    HandshakeReply,
    SyncTimeRequest,
    MasterServerIntroduction,
}

impl MessageKind {
    pub fn to_u8(self) -> u8 {
        match self {
            MessageKind::VesselProto => 1,
            MessageKind::VesselRemove => 2,
            MessageKind::HandshakeReply => 3,
            MessageKind::SyncTimeRequest => 4,
            MessageKind::MasterServerIntroduction => 5,
        }
    }

    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageKind::VesselProto),
            2 => Some(MessageKind::VesselRemove),
            3 => Some(MessageKind::HandshakeReply),
            4 => Some(MessageKind::SyncTimeRequest),
            5 => Some(MessageKind::MasterServerIntroduction),
            _ => None,
        }
    }

    /// Master-server messages are sent unconnected to every rendezvous
    /// endpoint rather than over the game connection.
    pub fn is_master_server(&self) -> bool {
        matches!(self, MessageKind::MasterServerIntroduction)
    }
}

impl Serde for MessageKind {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(self.to_u8());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Self::from_u8(reader.read_byte()?).ok_or(SerdeErr)
    }

    fn bit_length(&self) -> u32 {
        8
    }
}
