use thiserror::Error;

/// A routine invocation that did not complete. Logged by the scheduler;
/// the routine is simply invoked again on its next cadence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutineError {
    #[error("Routine '{routine}' failed: {reason}")]
    Failed { routine: &'static str, reason: String },

    #[error("Routine '{routine}' panicked: {message}")]
    Panicked { routine: &'static str, message: String },
}
