use std::collections::BTreeSet;

use flotilla_serde::{BitReader, BitWrite, Serde, SerdeErr};

use crate::types::{Subspace, VesselId};

/// Serializable structural and state description of a vessel: enough to
/// instantiate it from scratch or to merge into an existing live vessel.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtoVessel {
    pub vessel_id: VesselId,
    pub name: String,
    pub vessel_type: VesselType,
    pub subspace: Subspace,
    pub position: Position,
    pub landed: bool,
    pub splashed: bool,
    pub persistent: bool,
    pub parts: Vec<ProtoPart>,
}

impl ProtoVessel {
    pub fn new(vessel_id: VesselId, name: &str, vessel_type: VesselType, subspace: Subspace) -> Self {
        Self {
            vessel_id,
            name: name.to_string(),
            vessel_type,
            subspace,
            position: Position::default(),
            landed: false,
            splashed: false,
            persistent: true,
            parts: Vec::new(),
        }
    }

    /// The structural identity of this vessel: the flight ids of its parts.
    pub fn structural_ids(&self) -> BTreeSet<u32> {
        self.parts.iter().map(|part| part.flight_id).collect()
    }

    pub fn part(&self, flight_id: u32) -> Option<&ProtoPart> {
        self.parts.iter().find(|part| part.flight_id == flight_id)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }
}

impl Serde for ProtoVessel {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.vessel_id.ser(writer);
        self.name.ser(writer);
        self.vessel_type.ser(writer);
        self.subspace.ser(writer);
        self.position.ser(writer);

        self.landed.ser(writer);
        self.splashed.ser(writer);
        self.persistent.ser(writer);
        writer.write_pad_bits();

        self.parts.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let vessel_id = VesselId::de(reader)?;
        let name = String::de(reader)?;
        let vessel_type = VesselType::de(reader)?;
        let subspace = Subspace::de(reader)?;
        let position = Position::de(reader)?;

        let landed = bool::de(reader)?;
        let splashed = bool::de(reader)?;
        let persistent = bool::de(reader)?;
        reader.skip_pad_bits();

        let parts = Vec::<ProtoPart>::de(reader)?;

        Ok(Self {
            vessel_id,
            name,
            vessel_type,
            subspace,
            position,
            landed,
            splashed,
            persistent,
            parts,
        })
    }
}

/// A single part of a vessel. `flight_id` is its structural identity; the
/// remaining fields are mutable state that can be reapplied in place.
#[derive(Clone, Debug, PartialEq)]
pub struct ProtoPart {
    pub flight_id: u32,
    pub name: String,
    pub deployed: bool,
    pub shielded: bool,
    pub deploy_position: f32,
    pub temperature: f64,
}

impl ProtoPart {
    pub fn new(flight_id: u32, name: &str) -> Self {
        Self {
            flight_id,
            name: name.to_string(),
            deployed: false,
            shielded: false,
            deploy_position: 0.0,
            temperature: 0.0,
        }
    }
}

impl Serde for ProtoPart {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.flight_id.ser(writer);
        self.name.ser(writer);

        self.deployed.ser(writer);
        self.shielded.ser(writer);
        writer.write_pad_bits();

        self.deploy_position.ser(writer);
        self.temperature.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let flight_id = u32::de(reader)?;
        let name = String::de(reader)?;

        let deployed = bool::de(reader)?;
        let shielded = bool::de(reader)?;
        reader.skip_pad_bits();

        let deploy_position = f32::de(reader)?;
        let temperature = f64::de(reader)?;

        Ok(Self {
            flight_id,
            name,
            deployed,
            shielded,
            deploy_position,
            temperature,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VesselType {
    Ship,
    Probe,
    Debris,
    SpaceObject,
    Flag,
    Eva,
}

impl VesselType {
    fn index(&self) -> u8 {
        match self {
            VesselType::Ship => 0,
            VesselType::Probe => 1,
            VesselType::Debris => 2,
            VesselType::SpaceObject => 3,
            VesselType::Flag => 4,
            VesselType::Eva => 5,
        }
    }
}

impl Serde for VesselType {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(self.index());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(VesselType::Ship),
            1 => Ok(VesselType::Probe),
            2 => Ok(VesselType::Debris),
            3 => Ok(VesselType::SpaceObject),
            4 => Ok(VesselType::Flag),
            5 => Ok(VesselType::Eva),
            _ => Err(SerdeErr),
        }
    }

    fn bit_length(&self) -> u32 {
        8
    }
}

/// World-space position, in meters.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl Serde for Position {
    fn ser(&self, writer: &mut dyn BitWrite) {
        self.x.ser(writer);
        self.y.ser(writer);
        self.z.ser(writer);
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            x: f64::de(reader)?,
            y: f64::de(reader)?,
            z: f64::de(reader)?,
        })
    }

    fn bit_length(&self) -> u32 {
        3 * 64
    }
}
