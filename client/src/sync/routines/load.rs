use std::{collections::HashSet, time::Instant};

use log::{debug, info, warn};

use flotilla_shared::{VesselId, VesselType};

use crate::{
    sync::{context::SyncContext, error::RoutineError, routine::Routine},
    world::{
        Authority, Host, PolicyDecision, RemovalCoordinator, Scene, SimulationView, VesselStore,
    },
};

/// Vessels that should be instantiated locally: absent from the host world,
/// in the local subspace, outside the safety bubble while in flight, not
/// refused by the content policy and not kill-listed. Refreshes every
/// record's safety-bubble flag on the way.
pub fn load_candidates(
    store: &VesselStore,
    removal: &RemovalCoordinator,
    view: &dyn SimulationView,
    safety_bubble_radius: f64,
) -> Vec<VesselId> {
    let in_flight = view.scene() == Scene::Flight;
    let subspace = view.current_subspace();
    let bubble_center = view.safety_bubble_center();
    let live: HashSet<VesselId> = view.live_vessel_ids().into_iter().collect();

    let mut ids = store.ids();
    ids.sort();
    ids.into_iter()
        .filter(|id| !removal.is_scheduled(*id))
        .filter(|id| {
            let record = match store.record(*id) {
                Some(record) => record,
                None => return false,
            };
            let mut record = record.lock();

            let in_bubble = match bubble_center {
                Some(center) => record.proto().position.distance_to(&center) < safety_bubble_radius,
                None => false,
            };
            record.set_in_safety_bubble(in_bubble);

            !record.exists()
                && !live.contains(id)
                && !record.policy_denied()
                && record.subspace() == subspace
                && !(in_flight && in_bubble)
        })
        .collect()
}

/// Records without a live vessel of their own whose vessel is nevertheless
/// present in the host world, minus the ones the local player owns
pub fn adoption_candidates(
    store: &VesselStore,
    removal: &RemovalCoordinator,
    view: &dyn SimulationView,
    authority: &dyn Authority,
) -> Vec<VesselId> {
    let mut ids: Vec<VesselId> = view
        .live_vessel_ids()
        .into_iter()
        .filter(|id| !removal.is_scheduled(*id))
        .filter(|id| !super::is_locally_owned(view, authority, *id))
        .filter(|id| match store.record(*id) {
            Some(record) => !record.lock().exists(),
            None => false,
        })
        .collect();
    ids.sort();
    ids
}

// Flags and EVA kerbals cannot carry restricted parts
fn is_policy_exempt(vessel_type: VesselType) -> bool {
    matches!(vessel_type, VesselType::Flag | VesselType::Eva)
}

/// Instantiates remote vessels that should exist locally
#[derive(Default)]
pub struct LoadRoutine;

impl LoadRoutine {
    pub const NAME: &'static str = "LoadVessels";

    pub fn new() -> Self {
        Self
    }
}

impl Routine for LoadRoutine {
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

        let candidates = load_candidates(
            &context.store,
            &context.removal,
            host.view,
            context.config.safety_bubble_radius,
        );

        let adoptions =
            adoption_candidates(&context.store, &context.removal, host.view, host.authority);
        for vessel_id in adoptions {
            if context.removal.is_scheduled(vessel_id) {
                continue;
            }
            let record = match context.store.record(vessel_id) {
                Some(record) => record,
                None => continue,
            };
            let mut record = record.lock();
            if record.exists() {
                continue;
            }
            match host.loader.adopt(vessel_id) {
                Some(live) => {
                    record.adopt_live(live, now);
                    debug!("Adopted live vessel {}", vessel_id);
                }
                None => debug!("Vessel {} is live but could not be adopted", vessel_id),
            }
        }

        for vessel_id in candidates {
            if context.removal.is_scheduled(vessel_id) {
                continue;
            }
            let record = match context.store.record(vessel_id) {
                Some(record) => record,
                None => continue,
            };
            let mut record = record.lock();
            if record.exists() {
                continue;
            }

            if !is_policy_exempt(record.proto().vessel_type) {
                if let PolicyDecision::Deny(reasons) = host.policy.evaluate(record.proto()) {
                    warn!(
                        "Vessel {} refused by content policy: {}",
                        vessel_id,
                        reasons.join(", ")
                    );
                    record.set_policy_denied();
                    host.denials.vessel_denied(vessel_id, &reasons);
                    continue;
                }
            }

            match host.loader.load(record.proto()) {
                Ok(live) => {
                    record.attach_live(live, now);
                    info!("Loaded vessel {} ({})", vessel_id, record.proto().name);
                }
                Err(err) => warn!("{}", err),
            }
        }

        Ok(())
    }
}
