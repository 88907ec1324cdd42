use std::time::SystemTime;

use thiserror::Error;

/// Error type for timestamp operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeError {
    /// System time is before UNIX epoch
    #[error("System time is before UNIX epoch")]
    SystemTimeBeforeEpoch,
}

pub struct Timestamp;

impl Timestamp {
    /// Returns the current wall-clock time in milliseconds since UNIX epoch.
    ///
    /// # Errors
    /// Returns `TimeError::SystemTimeBeforeEpoch` if system time is before UNIX epoch.
    pub fn try_now_millis() -> Result<i64, TimeError> {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_millis() as i64)
            .map_err(|_| TimeError::SystemTimeBeforeEpoch)
    }
}
