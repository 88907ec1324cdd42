mod error;
mod host;
mod merger;
mod refresh_marker;
mod removal;
mod vessel_record;
mod vessel_store;

pub use error::{LoadError, MergeError};
pub use host::{
    Authority, ContentPolicy, DenialSink, Host, LiveVessel, PolicyDecision, Scene, SimulationView,
    VesselLoader,
};
pub use merger::{merge, MergeReport, StructuralDiff};
pub use refresh_marker::{RefreshGuard, RefreshMarker};
pub use removal::RemovalCoordinator;
pub use vessel_record::{VesselRecord, VesselStatus};
pub use vessel_store::VesselStore;
