use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::types::VesselId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VesselRemoveMsgData {
    pub vessel_id: VesselId,
    /// Whether receivers should also refuse later definitions of this vessel
    pub add_to_kill_list: bool,
}

impl Serde for VesselRemoveMsgData {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.vessel_id.ser(writer);
        self.add_to_kill_list.ser(writer);
        writer.write_pad_bits();
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let vessel_id = VesselId::de(reader)?;
        let add_to_kill_list = bool::de(reader)?;
        reader.skip_pad_bits();

        Ok(Self {
            vessel_id,
            add_to_kill_list,
        })
    }
}
