use std::{
    collections::{HashMap, HashSet},
    time::{Duration, Instant},
};

use log::{debug, info};
use parking_lot::Mutex;

use flotilla_shared::VesselId;

use crate::world::{host::VesselLoader, vessel_store::VesselStore};

/// The kill list. Every routine asks [`RemovalCoordinator::is_scheduled`]
/// before touching a vessel; destruction itself only happens in
/// [`RemovalCoordinator::execute_pending`], called once per tick after all
/// routines have run.
pub struct RemovalCoordinator {
    // id -> whether late definitions should be ignored after destruction
    pending: Mutex<HashMap<VesselId, bool>>,
    recently_removed: Mutex<HashMap<VesselId, Instant>>,
    grace: Duration,
}

impl RemovalCoordinator {
    pub fn new(grace: Duration) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            recently_removed: Mutex::new(HashMap::new()),
            grace,
        }
    }

    /// Schedules destruction. Idempotent. Definitions arriving within the
    /// grace period after destruction are ignored.
    pub fn add(&self, vessel_id: VesselId) {
        self.pending.lock().insert(vessel_id, true);
    }

    /// Schedules destruction without remembering the id afterwards, so a
    /// later definition recreates the vessel straight away.
    pub fn add_transient(&self, vessel_id: VesselId) {
        self.pending.lock().entry(vessel_id).or_insert(false);
    }

    pub fn is_scheduled(&self, vessel_id: VesselId) -> bool {
        self.pending.lock().contains_key(&vessel_id)
    }

    pub fn pending_ids(&self) -> HashSet<VesselId> {
        self.pending.lock().keys().copied().collect()
    }

    pub fn was_recently_removed(&self, vessel_id: VesselId, now: Instant) -> bool {
        match self.recently_removed.lock().get(&vessel_id) {
            Some(removed_at) => now.saturating_duration_since(*removed_at) < self.grace,
            None => false,
        }
    }

    /// Destroys every pending vessel in the host world and drops its record.
    /// Returns the ids that were processed.
    pub fn execute_pending(
        &self,
        store: &VesselStore,
        loader: &mut dyn VesselLoader,
        now: Instant,
    ) -> Vec<VesselId> {
        let pending: Vec<(VesselId, bool)> = self.pending.lock().drain().collect();

        let mut recently_removed = self.recently_removed.lock();
        let grace = self.grace;
        recently_removed.retain(|_, removed_at| now.saturating_duration_since(*removed_at) < grace);

        let mut removed = Vec::with_capacity(pending.len());
        for (vessel_id, remember) in pending {
            let destroyed = loader.destroy(vessel_id);
            let had_record = store.remove(vessel_id);
            if destroyed || had_record {
                info!("Removed vessel {}", vessel_id);
            } else {
                debug!("Vessel {} was already gone", vessel_id);
            }
            if remember {
                recently_removed.insert(vessel_id, now);
            }
            removed.push(vessel_id);
        }
        removed
    }

    pub(crate) fn clear(&self) {
        self.pending.lock().clear();
        self.recently_removed.lock().clear();
    }
}
