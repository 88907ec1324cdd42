use std::{collections::HashMap, sync::Arc, time::Instant};

use log::trace;
use parking_lot::{Mutex, RwLock};

use flotilla_shared::{ProtoVessel, VesselId};

use crate::world::vessel_record::{VesselRecord, VesselStatus};

/// Authoritative map of remote vessel state, shared between the receive
/// path and the scheduler.
///
/// The map lock is only held long enough to look up or copy keys. Each
/// record has its own lock, so merging one vessel never blocks updates to
/// another. Routines iterate over [`VesselStore::ids`], a point-in-time copy,
/// and must tolerate a record having disappeared by the time they look it up.
#[derive(Default)]
pub struct VesselStore {
    records: RwLock<HashMap<VesselId, Arc<Mutex<VesselRecord>>>>,
}

impl VesselStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lands an inbound definition: creates the record on first sight,
    /// otherwise replaces its snapshot and marks it dirty.
    pub fn handle_proto_update(&self, proto: ProtoVessel, now: Instant) {
        let vessel_id = proto.vessel_id;

        if let Some(record) = self.record(vessel_id) {
            record.lock().set_proto(proto, now);
            trace!("Updated definition of vessel {}", vessel_id);
            return;
        }

        let mut records = self.records.write();
        match records.get(&vessel_id) {
            // Lost a race with another writer between the read and write locks
            Some(record) => record.lock().set_proto(proto, now),
            None => {
                records.insert(vessel_id, Arc::new(Mutex::new(VesselRecord::new(proto, now))));
                trace!("Created record for vessel {}", vessel_id);
            }
        }
    }

    /// Snapshot of the current keys
    pub fn ids(&self) -> Vec<VesselId> {
        self.records.read().keys().copied().collect()
    }

    pub fn record(&self, vessel_id: VesselId) -> Option<Arc<Mutex<VesselRecord>>> {
        self.records.read().get(&vessel_id).cloned()
    }

    pub fn contains(&self, vessel_id: VesselId) -> bool {
        self.records.read().contains_key(&vessel_id)
    }

    pub fn status(&self, vessel_id: VesselId) -> Option<VesselStatus> {
        self.record(vessel_id).map(|record| record.lock().status())
    }

    pub fn statuses(&self) -> Vec<(VesselId, VesselStatus)> {
        let records: Vec<_> = self
            .records
            .read()
            .iter()
            .map(|(id, record)| (*id, record.clone()))
            .collect();
        records
            .into_iter()
            .map(|(id, record)| (id, record.lock().status()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    pub(crate) fn remove(&self, vessel_id: VesselId) -> bool {
        self.records.write().remove(&vessel_id).is_some()
    }

    pub(crate) fn clear(&self) {
        self.records.write().clear();
    }
}
