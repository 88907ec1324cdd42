use std::time::Instant;

use crate::{
    sync::{context::SyncContext, error::RoutineError},
    world::Host,
};

/// One independently cadenced piece of synchronization work
pub trait Routine: Send {
    fn name(&self) -> &'static str;
    fn run(
        &mut self,
        context: &SyncContext,
        host: &mut Host<'_>,
        now: Instant,
    ) -> Result<(), RoutineError>;
}
