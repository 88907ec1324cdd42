use flotilla_serde::{BitReader, BitWrite, ConstBitLength, Serde, SerdeErr};

/// Clock synchronization request. The sender loop rewrites `client_send_time`
/// right before the envelope is written, so queueing delay does not skew the
/// measurement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyncTimeRequestMsgData {
    pub client_send_time: i64,
}

impl Serde for SyncTimeRequestMsgData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.client_send_time.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            client_send_time: i64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        <i64 as ConstBitLength>::const_bit_length()
    }
}
