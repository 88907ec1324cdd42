use std::time::Instant;

use log::info;

use crate::{
    sync::{
        context::SyncContext,
        routines::{
            DebrisCleanupRoutine, DefinitionBroadcastRoutine, LoadRoutine, OwnVesselCheckRoutine,
            RefreshRoutine,
        },
        scheduler::{RoutineProfile, Scheduler},
    },
    world::Host,
};

/// Owns the vessel synchronization routines and the point in each tick
/// where kill-listed vessels are actually destroyed.
pub struct VesselProtoSystem {
    context: SyncContext,
    scheduler: Scheduler,
    enabled: bool,
}

impl VesselProtoSystem {
    pub fn new(context: SyncContext) -> Self {
        let config = &context.config;
        let mut scheduler = Scheduler::new();
        scheduler.add(Box::new(DebrisCleanupRoutine::new()), config.debris_cleanup_interval);
        scheduler.add(Box::new(LoadRoutine::new()), config.load_interval);
        scheduler.add(Box::new(RefreshRoutine::new()), config.refresh_interval);
        scheduler.add(
            Box::new(OwnVesselCheckRoutine::new()),
            config.own_vessel_check_interval,
        );
        scheduler.add(
            Box::new(DefinitionBroadcastRoutine::new()),
            config.vessel_definition_interval,
        );

        Self {
            context,
            scheduler,
            enabled: false,
        }
    }

    pub fn context(&self) -> &SyncContext {
        &self.context
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        if !self.enabled {
            info!("Vessel synchronization enabled");
            self.enabled = true;
        }
    }

    /// Stops the routines and forgets every remote vessel and pending removal
    pub fn disable(&mut self) {
        if self.enabled {
            info!("Vessel synchronization disabled");
        }
        self.enabled = false;
        self.context.store.clear();
        self.context.removal.clear();
    }

    /// Runs the due routines, then executes pending removals
    pub fn tick(&mut self, host: &mut Host<'_>, now: Instant) {
        if !self.enabled {
            return;
        }
        self.scheduler.tick(&self.context, host, now);
        self.context
            .removal
            .execute_pending(&self.context.store, host.loader, now);
    }

    pub fn profile(&self, routine: &str) -> Option<RoutineProfile> {
        self.scheduler.profile(routine)
    }

    pub fn profiler_report(&self) -> String {
        self.scheduler.profiler_report()
    }
}
