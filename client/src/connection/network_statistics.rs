use std::sync::{
    atomic::{AtomicI64, AtomicU64, Ordering},
    Arc,
};

/// Liveness counters updated by the gateway on every successful send
#[derive(Clone, Debug, Default)]
pub struct NetworkStatistics {
    last_send_time: Arc<AtomicI64>,
    messages_sent: Arc<AtomicU64>,
}

impl NetworkStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_send(&self, sent_time: i64) {
        self.last_send_time.store(sent_time, Ordering::Release);
        self.messages_sent.fetch_add(1, Ordering::AcqRel);
    }

    /// Milliseconds since the UNIX epoch of the last send, 0 if nothing was sent yet
    pub fn last_send_time(&self) -> i64 {
        self.last_send_time.load(Ordering::Acquire)
    }

    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Acquire)
    }
}
