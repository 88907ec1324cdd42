use thiserror::Error;

use flotilla_shared::VesselId;

/// Structural mismatch found while merging a snapshot into a live vessel.
/// Never fatal: the merge logs it and continues with the other parts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    #[error("Part {flight_id} of vessel {vessel_id} no longer exists in the live vessel")]
    PartMissing { vessel_id: VesselId, flight_id: u32 },

    #[error("Part {flight_id} of vessel {vessel_id} is already present in the live vessel")]
    PartAlreadyPresent { vessel_id: VesselId, flight_id: u32 },

    #[error("Live vessel {vessel_id} refused part {flight_id}: {reason}")]
    PartRejected {
        vessel_id: VesselId,
        flight_id: u32,
        reason: String,
    },
}

/// The host could not instantiate a vessel from its snapshot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unable to load vessel {vessel_id}: {reason}")]
pub struct LoadError {
    pub vessel_id: VesselId,
    pub reason: String,
}
