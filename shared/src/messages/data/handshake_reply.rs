use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeReply {
    Handshook,
    InvalidKey,
    InvalidPlayerName,
    PlayerBanned,
    ServerFull,
    NotWhitelisted,
}

impl HandshakeReply {
    fn to_i32(self) -> i32 {
        match self {
            HandshakeReply::Handshook => 0,
            HandshakeReply::InvalidKey => 1,
            HandshakeReply::InvalidPlayerName => 2,
            HandshakeReply::PlayerBanned => 3,
            HandshakeReply::ServerFull => 4,
            HandshakeReply::NotWhitelisted => 5,
        }
    }

    fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(HandshakeReply::Handshook),
            1 => Some(HandshakeReply::InvalidKey),
            2 => Some(HandshakeReply::InvalidPlayerName),
            3 => Some(HandshakeReply::PlayerBanned),
            4 => Some(HandshakeReply::ServerFull),
            5 => Some(HandshakeReply::NotWhitelisted),
            _ => None,
        }
    }
}

/// Server's answer to a handshake request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandshakeReplyMsgData {
    pub response: HandshakeReply,
    pub reason: String,
    pub mod_control: bool,
    pub server_start_time: i64,
    pub player_id: u128,
    pub mod_file_data: String,
}

impl Serde for HandshakeReplyMsgData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.response.to_i32().ser(writer);
        self.reason.ser(writer);

        self.mod_control.ser(writer);
        writer.write_pad_bits();

        self.server_start_time.ser(writer);
        self.player_id.ser(writer);
        self.mod_file_data.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let response = HandshakeReply::from_i32(i32::de(reader)?).ok_or(SerdeErr)?;
        let reason = String::de(reader)?;

        let mod_control = bool::de(reader)?;
        reader.skip_pad_bits();

        let server_start_time = i64::de(reader)?;
        let player_id = u128::de(reader)?;
        let mod_file_data = String::de(reader)?;

        Ok(Self {
            response,
            reason,
            mod_control,
            server_start_time,
            player_id,
            mod_file_data,
        })
    }
}
