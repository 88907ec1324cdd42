use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Global stop flag for the sender loop, observed once per idle interval.
#[derive(Clone, Debug, Default)]
pub struct ResetSignal {
    requested: Arc<AtomicBool>,
}

impl ResetSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::Release);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    /// Re-arms the signal so a new sender loop can be spawned
    pub fn clear(&self) {
        self.requested.store(false, Ordering::Release);
    }
}
