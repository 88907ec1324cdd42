use std::collections::BTreeSet;

use log::warn;

use flotilla_shared::ProtoVessel;

use crate::world::{error::MergeError, host::LiveVessel};

/// Which parts a snapshot adds, removes or keeps relative to what was last
/// applied to the live vessel
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuralDiff {
    pub added: BTreeSet<u32>,
    pub removed: BTreeSet<u32>,
    pub retained: BTreeSet<u32>,
}

impl StructuralDiff {
    pub fn between(known: &BTreeSet<u32>, proto: &ProtoVessel) -> Self {
        let incoming = proto.structural_ids();
        Self {
            added: incoming.difference(known).copied().collect(),
            removed: known.difference(&incoming).copied().collect(),
            retained: incoming.intersection(known).copied().collect(),
        }
    }

    pub fn is_structural_change(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub diff: StructuralDiff,
    /// Mismatches that were skipped
    pub errors: Vec<MergeError>,
}

impl MergeReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Applies `proto` onto `live`, touching only what changed. Parts that
/// cannot be reconciled are logged and skipped. `known` is replaced with the
/// part set the live vessel actually ends up with.
pub fn merge(proto: &ProtoVessel, live: &mut dyn LiveVessel, known: &mut BTreeSet<u32>) -> MergeReport {
    let diff = StructuralDiff::between(known, proto);
    let mut errors = Vec::new();

    for flight_id in &diff.removed {
        if let Err(err) = live.remove_part(*flight_id) {
            errors.push(err);
        }
    }

    for flight_id in &diff.added {
        if let Some(part) = proto.part(*flight_id) {
            if let Err(err) = live.add_part(part) {
                errors.push(err);
            }
        }
    }

    for flight_id in &diff.retained {
        if let Some(part) = proto.part(*flight_id) {
            if let Err(err) = live.apply_part_state(part) {
                errors.push(err);
            }
        }
    }

    live.apply_vessel_state(proto);

    for err in &errors {
        warn!("Merge of vessel {}: {}", proto.vessel_id, err);
    }

    *known = live.part_ids();
    MergeReport { diff, errors }
}
