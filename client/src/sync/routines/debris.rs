use std::time::Instant;

use log::debug;

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::Host,
};

/// While spectating, anything the local physics created on its own (crash
/// debris, mostly) has no record in the store and is scheduled for removal.
#[derive(Default)]
pub struct DebrisCleanupRoutine;

impl DebrisCleanupRoutine {
    pub const NAME: &'static str = "DebrisCleanup";

    pub fn new() -> Self {
        Self
    }
}

impl Routine for DebrisCleanupRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &mut self,
        context: &SyncContext,
        host: &mut Host<'_>,
        _now: Instant,
    ) -> Result<(), RoutineError> {
        if !host.authority.is_spectating() {
            return Ok(());
        }

        for vessel_id in host.view.live_vessel_ids() {
            if context.store.contains(vessel_id) || context.removal.is_scheduled(vessel_id) {
                continue;
            }
            debug!("Scheduling removal of extraneous vessel {}", vessel_id);
            context.removal.add_transient(vessel_id);
        }

        Ok(())
    }
}
