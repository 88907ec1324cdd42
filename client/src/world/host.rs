//! The host game as seen from the synchronization core. The host calls
//! `tick` once per frame and hands in these collaborators; the core never
//! reaches into the game on its own.

use std::collections::BTreeSet;

use flotilla_shared::{Position, ProtoPart, ProtoVessel, Subspace, VesselId};

use crate::world::error::{LoadError, MergeError};

/// Host scenes, ordered by how far the game has progressed into play
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Scene {
    MainMenu,
    SpaceCenter,
    TrackingStation,
    Flight,
}

/// A vessel instantiated in the host simulation
pub trait LiveVessel: Send {
    fn vessel_id(&self) -> VesselId;
    /// Flight ids of the parts currently attached
    fn part_ids(&self) -> BTreeSet<u32>;
    fn part_count(&self) -> usize {
        self.part_ids().len()
    }
    fn add_part(&mut self, part: &ProtoPart) -> Result<(), MergeError>;
    fn remove_part(&mut self, flight_id: u32) -> Result<(), MergeError>;
    /// Reapplies mutable state (deployment, temperature...) to an attached part
    fn apply_part_state(&mut self, part: &ProtoPart) -> Result<(), MergeError>;
    /// Vessel-level state such as situation flags. Most hosts drive position
    /// through their own interpolation and can ignore this.
    fn apply_vessel_state(&mut self, _proto: &ProtoVessel) {}
}

/// Read-only, per-tick view of the local simulation
pub trait SimulationView {
    fn scene(&self) -> Scene;
    fn current_subspace(&self) -> Subspace;
    /// The vessel the local player is controlling or spectating
    fn active_vessel_id(&self) -> Option<VesselId>;
    fn active_vessel_part_count(&self) -> Option<usize>;
    /// Other vessels the local player may hold authority over, e.g. ones
    /// within physics range of the active vessel
    fn secondary_vessel_ids(&self) -> Vec<VesselId>;
    /// Centre of the safety bubble, `None` when there is none
    fn safety_bubble_center(&self) -> Option<Position>;
    /// Every vessel instantiated locally, remote or not
    fn live_vessel_ids(&self) -> Vec<VesselId>;
    /// Serializable description of a locally simulated vessel
    fn snapshot(&self, vessel_id: VesselId) -> Option<ProtoVessel>;
}

pub trait Authority {
    fn has_authority(&self, vessel_id: VesselId) -> bool;
    fn is_spectating(&self) -> bool;
}

pub trait VesselLoader {
    fn load(&mut self, proto: &ProtoVessel) -> Result<Box<dyn LiveVessel>, LoadError>;
    /// Removes a vessel from the host world. Returns false if it was not there.
    fn destroy(&mut self, vessel_id: VesselId) -> bool;
    /// Hands over a vessel that is already live in the host world so its
    /// record can track it. `None` leaves the vessel untracked.
    fn adopt(&mut self, _vessel_id: VesselId) -> Option<Box<dyn LiveVessel>> {
        None
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyDecision {
    Allow,
    Deny(Vec<String>),
}

pub trait ContentPolicy {
    fn evaluate(&self, proto: &ProtoVessel) -> PolicyDecision;
}

/// Receives content-policy denials for display
pub trait DenialSink {
    fn vessel_denied(&mut self, vessel_id: VesselId, reasons: &[String]);
}

/// Everything a scheduler tick borrows from the host
pub struct Host<'a> {
    pub view: &'a dyn SimulationView,
    pub authority: &'a dyn Authority,
    pub loader: &'a mut dyn VesselLoader,
    pub policy: &'a dyn ContentPolicy,
    pub denials: &'a mut dyn DenialSink,
}
