use std::sync::Arc;

use crate::{
    client_config::SyncConfig,
    sender::DispatchQueue,
    world::{RefreshMarker, RemovalCoordinator, VesselStore},
};

/// Shared state handed to every routine. Cloning is cheap and yields handles
/// to the same store, queue and kill list.
#[derive(Clone)]
pub struct SyncContext {
    pub store: Arc<VesselStore>,
    pub queue: DispatchQueue,
    pub removal: Arc<RemovalCoordinator>,
    pub refresh_marker: Arc<RefreshMarker>,
    pub config: SyncConfig,
}

impl SyncContext {
    pub fn new(config: SyncConfig, queue: DispatchQueue) -> Self {
        Self {
            store: Arc::new(VesselStore::new()),
            queue,
            removal: Arc::new(RemovalCoordinator::new(config.removal_grace)),
            refresh_marker: Arc::new(RefreshMarker::new()),
            config,
        }
    }
}
