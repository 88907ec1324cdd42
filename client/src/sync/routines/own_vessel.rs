use std::time::Instant;

use log::debug;

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::{Host, Scene},
};

/// While spectating, forces a re-merge of the spectated vessel when its live
/// part count drifts from the last received definition
#[derive(Default)]
pub struct OwnVesselCheckRoutine;

impl OwnVesselCheckRoutine {
    pub const NAME: &'static str = "CheckSpectatedVessel";

    pub fn new() -> Self {
        Self
    }
}

impl Routine for OwnVesselCheckRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &mut self,
        context: &SyncContext,
        host: &mut Host<'_>,
        _now: Instant,
    ) -> Result<(), RoutineError> {
        if host.view.scene() != Scene::Flight || !host.authority.is_spectating() {
            return Ok(());
        }
        let (vessel_id, live_part_count) =
            match (host.view.active_vessel_id(), host.view.active_vessel_part_count()) {
                (Some(vessel_id), Some(count)) => (vessel_id, count),
                _ => return Ok(()),
            };
        if context.removal.is_scheduled(vessel_id) {
            return Ok(());
        }
        let record = match context.store.record(vessel_id) {
            Some(record) => record,
            None => return Ok(()),
        };

        let mut record = record.lock();
        let expected = record.proto().part_count();
        if record.exists() && expected != live_part_count {
            debug!(
                "Spectated vessel {} has {} parts, definition has {}",
                vessel_id, live_part_count, expected
            );
            record.resync_known_parts();
        }
        Ok(())
    }
}
