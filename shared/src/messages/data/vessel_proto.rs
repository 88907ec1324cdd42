use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::vessel::proto::ProtoVessel;

/// Full definition of a vessel the sender has authority over.
#[derive(Clone, Debug, PartialEq)]
pub struct VesselProtoMsgData {
    pub vessel: ProtoVessel,
}

impl VesselProtoMsgData {
    pub fn new(vessel: ProtoVessel) -> Self {
        Self { vessel }
    }
}

impl Serde for VesselProtoMsgData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.vessel.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            vessel: ProtoVessel::de(reader)?,
        })
    }
}
