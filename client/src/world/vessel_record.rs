use std::{collections::BTreeSet, time::Instant};

use flotilla_shared::{ProtoVessel, Subspace, VesselId};

use crate::world::host::LiveVessel;

/// Diagnostic copy of a record's flags
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VesselStatus {
    pub exists: bool,
    pub has_update: bool,
    pub in_safety_bubble: bool,
    pub subspace: Subspace,
}

/// Everything the client knows about one remote vessel
pub struct VesselRecord {
    proto: ProtoVessel,
    live: Option<Box<dyn LiveVessel>>,
    known_parts: BTreeSet<u32>,
    has_update: bool,
    exists: bool,
    in_safety_bubble: bool,
    policy_denied: bool,
    created_at: Instant,
    updated_at: Instant,
}

impl VesselRecord {
    pub(crate) fn new(proto: ProtoVessel, now: Instant) -> Self {
        Self {
            proto,
            live: None,
            known_parts: BTreeSet::new(),
            has_update: true,
            exists: false,
            in_safety_bubble: false,
            policy_denied: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn vessel_id(&self) -> VesselId {
        self.proto.vessel_id
    }

    pub fn proto(&self) -> &ProtoVessel {
        &self.proto
    }

    pub fn live(&self) -> Option<&dyn LiveVessel> {
        self.live.as_deref()
    }

    /// Structural ids applied to the live vessel by the last load or merge
    pub fn known_parts(&self) -> &BTreeSet<u32> {
        &self.known_parts
    }

    pub fn has_update(&self) -> bool {
        self.has_update
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn in_safety_bubble(&self) -> bool {
        self.in_safety_bubble
    }

    pub fn subspace(&self) -> Subspace {
        self.proto.subspace
    }

    /// True once the content policy refused this definition. Cleared by the
    /// next inbound definition.
    pub fn policy_denied(&self) -> bool {
        self.policy_denied
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn updated_at(&self) -> Instant {
        self.updated_at
    }

    pub fn status(&self) -> VesselStatus {
        VesselStatus {
            exists: self.exists,
            has_update: self.has_update,
            in_safety_bubble: self.in_safety_bubble,
            subspace: self.subspace(),
        }
    }

    pub(crate) fn set_proto(&mut self, proto: ProtoVessel, now: Instant) {
        self.proto = proto;
        self.has_update = true;
        self.policy_denied = false;
        self.updated_at = now;
    }

    /// Re-reads the known part set from the live vessel and marks the record
    /// dirty, so the next merge repairs whatever drifted locally
    pub(crate) fn resync_known_parts(&mut self) {
        if let Some(live) = self.live.as_deref() {
            self.known_parts = live.part_ids();
        }
        self.has_update = true;
    }

    pub(crate) fn set_in_safety_bubble(&mut self, in_safety_bubble: bool) {
        self.in_safety_bubble = in_safety_bubble;
    }

    pub(crate) fn set_policy_denied(&mut self) {
        self.policy_denied = true;
    }

    pub(crate) fn attach_live(&mut self, live: Box<dyn LiveVessel>, now: Instant) {
        self.known_parts = live.part_ids();
        self.live = Some(live);
        self.exists = true;
        self.has_update = false;
        self.updated_at = now;
    }

    /// Tracks a vessel the host already had. The pending definition stays
    /// dirty so the refresh routine merges it into the adopted vessel.
    pub(crate) fn adopt_live(&mut self, live: Box<dyn LiveVessel>, now: Instant) {
        self.known_parts = live.part_ids();
        self.live = Some(live);
        self.exists = true;
        self.updated_at = now;
    }

    /// The host lost the live vessel; the load routine will instantiate it again
    pub(crate) fn detach_live(&mut self) {
        self.live = None;
        self.known_parts.clear();
        self.exists = false;
    }

    /// Splits the record into what the merger needs, borrowed disjointly
    pub(crate) fn merge_parts(
        &mut self,
    ) -> Option<(&ProtoVessel, &mut dyn LiveVessel, &mut BTreeSet<u32>)> {
        let live: &mut dyn LiveVessel = self.live.as_deref_mut()?;
        Some((&self.proto, live, &mut self.known_parts))
    }

    pub(crate) fn commit_merge(&mut self, now: Instant) {
        self.has_update = false;
        self.updated_at = now;
    }
}
