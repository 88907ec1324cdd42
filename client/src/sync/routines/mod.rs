//! The routines driven by [`VesselProtoSystem`](crate::VesselProtoSystem).
//!
//! Every routine collects its candidates from a copy of the store's keys and
//! checks the kill list again right before acting on each one, because the
//! receive path keeps mutating the store while routines run.

mod debris;
mod definition;
mod load;
mod own_vessel;
mod refresh;

pub use debris::DebrisCleanupRoutine;
pub use definition::DefinitionBroadcastRoutine;
pub use load::{adoption_candidates, load_candidates, LoadRoutine};
pub use own_vessel::OwnVesselCheckRoutine;
pub use refresh::{refresh_candidates, RefreshRoutine};

use flotilla_shared::VesselId;

use crate::world::{Authority, Scene, SimulationView};

/// Remote vessels can be loaded and refreshed
fn is_basic_ready(view: &dyn SimulationView) -> bool {
    view.scene() >= Scene::SpaceCenter
}

/// The local player is flying a vessel of their own
fn is_fully_ready(view: &dyn SimulationView, authority: &dyn Authority) -> bool {
    view.scene() == Scene::Flight && view.active_vessel_id().is_some() && !authority.is_spectating()
}

/// The local player flies this vessel or simulates it, so remote
/// definitions must not touch it
fn is_locally_owned(
    view: &dyn SimulationView,
    authority: &dyn Authority,
    vessel_id: VesselId,
) -> bool {
    !authority.is_spectating()
        && (view.active_vessel_id() == Some(vessel_id) || authority.has_authority(vessel_id))
}
