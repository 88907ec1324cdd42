mod context;
mod error;
mod proto_system;
mod routine;
mod scheduler;

pub mod routines;

pub use context::SyncContext;
pub use error::RoutineError;
pub use proto_system::VesselProtoSystem;
pub use routine::Routine;
pub use scheduler::{RoutineProfile, Scheduler};
