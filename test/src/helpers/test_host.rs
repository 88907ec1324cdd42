use std::{
    collections::{BTreeMap, BTreeSet, HashMap, HashSet},
    sync::Arc,
};

use parking_lot::Mutex;

use flotilla_client::{
    Authority, ContentPolicy, DenialSink, Host, LiveVessel, LoadError, MergeError,
    PolicyDecision, Scene, SimulationView, VesselLoader,
};
use flotilla_shared::{Position, ProtoPart, ProtoVessel, Subspace, VesselId};

type PartMap = Arc<Mutex<BTreeMap<u32, ProtoPart>>>;
type World = Arc<Mutex<BTreeMap<VesselId, PartMap>>>;

/// Live vessel whose parts are shared with the [`TestHost`] world, so tests
/// can inspect or damage it after handing it to the store
pub struct TestLiveVessel {
    vessel_id: VesselId,
    parts: PartMap,
}

impl LiveVessel for TestLiveVessel {
    fn vessel_id(&self) -> VesselId {
        self.vessel_id
    }

    fn part_ids(&self) -> BTreeSet<u32> {
        self.parts.lock().keys().copied().collect()
    }

    fn add_part(&mut self, part: &ProtoPart) -> Result<(), MergeError> {
        let mut parts = self.parts.lock();
        if parts.contains_key(&part.flight_id) {
            return Err(MergeError::PartAlreadyPresent {
                vessel_id: self.vessel_id,
                flight_id: part.flight_id,
            });
        }
        parts.insert(part.flight_id, part.clone());
        Ok(())
    }

    fn remove_part(&mut self, flight_id: u32) -> Result<(), MergeError> {
        match self.parts.lock().remove(&flight_id) {
            Some(_) => Ok(()),
            None => Err(MergeError::PartMissing {
                vessel_id: self.vessel_id,
                flight_id,
            }),
        }
    }

    fn apply_part_state(&mut self, part: &ProtoPart) -> Result<(), MergeError> {
        match self.parts.lock().get_mut(&part.flight_id) {
            Some(existing) => {
                *existing = part.clone();
                Ok(())
            }
            None => Err(MergeError::PartMissing {
                vessel_id: self.vessel_id,
                flight_id: part.flight_id,
            }),
        }
    }
}

pub struct TestView {
    pub scene: Scene,
    pub subspace: Subspace,
    pub active_vessel_id: Option<VesselId>,
    pub secondary_vessel_ids: Vec<VesselId>,
    pub safety_bubble_center: Option<Position>,
    /// Definitions of locally simulated vessels, returned by `snapshot`
    pub snapshots: HashMap<VesselId, ProtoVessel>,
    world: World,
}

impl SimulationView for TestView {
    fn scene(&self) -> Scene {
        self.scene
    }

    fn current_subspace(&self) -> Subspace {
        self.subspace
    }

    fn active_vessel_id(&self) -> Option<VesselId> {
        self.active_vessel_id
    }

    fn active_vessel_part_count(&self) -> Option<usize> {
        let vessel_id = self.active_vessel_id?;
        self.world
            .lock()
            .get(&vessel_id)
            .map(|parts| parts.lock().len())
    }

    fn secondary_vessel_ids(&self) -> Vec<VesselId> {
        self.secondary_vessel_ids.clone()
    }

    fn safety_bubble_center(&self) -> Option<Position> {
        self.safety_bubble_center
    }

    fn live_vessel_ids(&self) -> Vec<VesselId> {
        self.world.lock().keys().copied().collect()
    }

    fn snapshot(&self, vessel_id: VesselId) -> Option<ProtoVessel> {
        self.snapshots.get(&vessel_id).cloned()
    }
}

#[derive(Default)]
pub struct TestAuthority {
    pub spectating: bool,
    pub authoritative: HashSet<VesselId>,
}

impl Authority for TestAuthority {
    fn has_authority(&self, vessel_id: VesselId) -> bool {
        self.authoritative.contains(&vessel_id)
    }

    fn is_spectating(&self) -> bool {
        self.spectating
    }
}

pub struct TestLoader {
    world: World,
    pub loads: Vec<VesselId>,
    pub destroyed: Vec<VesselId>,
    pub adopted: Vec<VesselId>,
    /// Loads of these ids fail
    pub failing: HashSet<VesselId>,
    /// Called with each id right before it is loaded
    pub on_load: Option<Box<dyn FnMut(VesselId)>>,
}

impl VesselLoader for TestLoader {
    fn load(&mut self, proto: &ProtoVessel) -> Result<Box<dyn LiveVessel>, LoadError> {
        let vessel_id = proto.vessel_id;
        if let Some(hook) = self.on_load.as_mut() {
            hook(vessel_id);
        }
        if self.failing.contains(&vessel_id) {
            return Err(LoadError {
                vessel_id,
                reason: String::from("scripted failure"),
            });
        }

        let parts: PartMap = Arc::new(Mutex::new(
            proto
                .parts
                .iter()
                .map(|part| (part.flight_id, part.clone()))
                .collect(),
        ));
        self.world.lock().insert(vessel_id, parts.clone());
        self.loads.push(vessel_id);
        Ok(Box::new(TestLiveVessel { vessel_id, parts }))
    }

    fn destroy(&mut self, vessel_id: VesselId) -> bool {
        self.destroyed.push(vessel_id);
        self.world.lock().remove(&vessel_id).is_some()
    }

    fn adopt(&mut self, vessel_id: VesselId) -> Option<Box<dyn LiveVessel>> {
        let parts = self.world.lock().get(&vessel_id)?.clone();
        self.adopted.push(vessel_id);
        Some(Box::new(TestLiveVessel { vessel_id, parts }))
    }
}

/// Denies vessels carrying any part with a banned name
#[derive(Default)]
pub struct TestPolicy {
    pub banned_parts: Vec<String>,
}

impl ContentPolicy for TestPolicy {
    fn evaluate(&self, proto: &ProtoVessel) -> PolicyDecision {
        let reasons: Vec<String> = proto
            .parts
            .iter()
            .filter(|part| self.banned_parts.contains(&part.name))
            .map(|part| format!("banned part {}", part.name))
            .collect();
        if reasons.is_empty() {
            PolicyDecision::Allow
        } else {
            PolicyDecision::Deny(reasons)
        }
    }
}

#[derive(Default)]
pub struct RecordingDenials {
    pub denials: Vec<(VesselId, Vec<String>)>,
}

impl DenialSink for RecordingDenials {
    fn vessel_denied(&mut self, vessel_id: VesselId, reasons: &[String]) {
        self.denials.push((vessel_id, reasons.to_vec()));
    }
}

/// Scripted host world. Starts in flight, subspace 0, flying nothing.
pub struct TestHost {
    pub view: TestView,
    pub authority: TestAuthority,
    pub loader: TestLoader,
    pub policy: TestPolicy,
    pub denials: RecordingDenials,
    world: World,
}

impl TestHost {
    pub fn new() -> Self {
        let world: World = Arc::new(Mutex::new(BTreeMap::new()));
        Self {
            view: TestView {
                scene: Scene::Flight,
                subspace: 0,
                active_vessel_id: None,
                secondary_vessel_ids: Vec::new(),
                safety_bubble_center: None,
                snapshots: HashMap::new(),
                world: world.clone(),
            },
            authority: TestAuthority::default(),
            loader: TestLoader {
                world: world.clone(),
                loads: Vec::new(),
                destroyed: Vec::new(),
                adopted: Vec::new(),
                failing: HashSet::new(),
                on_load: None,
            },
            policy: TestPolicy::default(),
            denials: RecordingDenials::default(),
            world,
        }
    }

    pub fn host(&mut self) -> Host<'_> {
        Host {
            view: &self.view,
            authority: &self.authority,
            loader: &mut self.loader,
            policy: &self.policy,
            denials: &mut self.denials,
        }
    }

    /// Puts a vessel into the local world without going through the store,
    /// the way local physics spawns debris
    pub fn spawn_local(&mut self, vessel_id: VesselId, part_ids: &[u32]) {
        let parts = part_ids
            .iter()
            .map(|id| (*id, ProtoPart::new(*id, "debris")))
            .collect();
        self.world
            .lock()
            .insert(vessel_id, Arc::new(Mutex::new(parts)));
    }

    pub fn is_live(&self, vessel_id: VesselId) -> bool {
        self.world.lock().contains_key(&vessel_id)
    }

    pub fn live_part_ids(&self, vessel_id: VesselId) -> Option<BTreeSet<u32>> {
        self.world
            .lock()
            .get(&vessel_id)
            .map(|parts| parts.lock().keys().copied().collect())
    }

    /// Drops a part from a live vessel behind the store's back
    pub fn break_off_part(&mut self, vessel_id: VesselId, flight_id: u32) {
        if let Some(parts) = self.world.lock().get(&vessel_id) {
            parts.lock().remove(&flight_id);
        }
    }
}

impl Default for TestHost {
    fn default() -> Self {
        Self::new()
    }
}
