use std::time::Instant;

use log::{debug, warn};

use flotilla_shared::VesselId;

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::{merge, Authority, Host, RemovalCoordinator, SimulationView, VesselStore},
};

/// Loaded vessels with a pending definition, minus kill-listed ones. While
/// the local player is flying, vessels under local authority are left alone
/// so remote echoes cannot overwrite them.
pub fn refresh_candidates(
    store: &VesselStore,
    removal: &RemovalCoordinator,
    view: &dyn SimulationView,
    authority: &dyn Authority,
) -> Vec<VesselId> {
    let mut ids = store.ids();
    ids.sort();
    ids.into_iter()
        .filter(|id| !removal.is_scheduled(*id))
        .filter(|id| !super::is_locally_owned(view, authority, *id))
        .filter(|id| match store.record(*id) {
            Some(record) => {
                let record = record.lock();
                record.exists() && record.has_update()
            }
            None => false,
        })
        .collect()
}

/// Merges pending definitions into already loaded vessels
#[derive(Default)]
pub struct RefreshRoutine {
    last_pass: Option<Instant>,
}

impl RefreshRoutine {
    pub const NAME: &'static str = "RefreshVessels";

    pub fn new() -> Self {
        Self::default()
    }

    fn refresh(context: &SyncContext, vessel_id: VesselId, now: Instant) {
        if context.removal.is_scheduled(vessel_id) {
            return;
        }
        let record = match context.store.record(vessel_id) {
            Some(record) => record,
            None => return,
        };
        let _marker = match context.refresh_marker.try_acquire(vessel_id) {
            Some(marker) => marker,
            None => {
                warn!(
                    "Skipping refresh of {}, {:?} is still being refreshed",
                    vessel_id,
                    context.refresh_marker.current()
                );
                return;
            }
        };

        let mut record = record.lock();
        if !record.exists() || !record.has_update() {
            return;
        }

        let report = record
            .merge_parts()
            .map(|(proto, live, known)| merge(proto, live, known));

        match report {
            Some(report) => {
                record.commit_merge(now);
                debug!(
                    "Refreshed vessel {}: +{} -{} ~{} ({} mismatches)",
                    vessel_id,
                    report.diff.added.len(),
                    report.diff.removed.len(),
                    report.diff.retained.len(),
                    report.errors.len()
                );
            }
            None => {
                debug!("Vessel {} has no live object, reloading", vessel_id);
                record.detach_live();
            }
        }
    }
}

impl Routine for RefreshRoutine {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn run(
        &mut self,
        context: &SyncContext,
        host: &mut Host<'_>,
        now: Instant,
    ) -> Result<(), RoutineError> {
        if !super::is_basic_ready(host.view) {
            return Ok(());
        }
        if let Some(last_pass) = self.last_pass {
            if now.saturating_duration_since(last_pass) < context.config.refresh_debounce {
                return Ok(());
            }
        }

        for vessel_id in refresh_candidates(&context.store, &context.removal, host.view, host.authority) {
            Self::refresh(context, vessel_id, now);
        }

        self.last_pass = Some(now);
        Ok(())
    }
}
