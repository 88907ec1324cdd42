use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

/// Asks the rendezvous servers to introduce this client to a game server
/// behind NAT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MasterServerIntroductionMsgData {
    pub server_id: u64,
    pub internal_endpoint: String,
    pub token: String,
}

impl Serde for MasterServerIntroductionMsgData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.server_id.ser(writer);
        self.internal_endpoint.ser(writer);
        self.token.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            server_id: u64::de(reader)?,
            internal_endpoint: String::de(reader)?,
            token: String::de(reader)?,
        })
    }
}
