use std::{default::Default, net::SocketAddr, time::Duration};

use flotilla_shared::CompressionConfig;

/// Contains Config properties which will be used by the Client
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Used to configure the connection and the sender loop
    pub connection: ConnectionConfig,
    /// Cadences and thresholds used by the synchronization routines
    pub sync: SyncConfig,
}

#[derive(Clone, Debug)]
pub struct ConnectionConfig {
    /// How long the sender loop sleeps when it finds the dispatch queue empty.
    /// This is also the upper bound on how long a reset request goes unnoticed.
    pub send_receive_interval: Duration,
    /// Must match the peers' setting; nothing on the wire says whether a
    /// payload was compressed.
    pub compression: CompressionConfig,
    /// Rendezvous endpoints that receive master-server envelopes
    pub master_servers: Vec<SocketAddr>,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            send_receive_interval: Duration::from_millis(5),
            compression: CompressionConfig::default(),
            master_servers: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SyncConfig {
    /// Cadence of the load routine
    pub load_interval: Duration,
    /// Cadence of the refresh routine
    pub refresh_interval: Duration,
    /// Minimum time between two completed refresh passes, checked on top of
    /// `refresh_interval`
    pub refresh_debounce: Duration,
    /// Cadence of the debris-cleanup routine
    pub debris_cleanup_interval: Duration,
    /// Cadence of the spectated-vessel consistency check
    pub own_vessel_check_interval: Duration,
    /// Cadence of the definition broadcast. Negotiated with the server, see
    /// [`SyncConfig::with_server_settings`]
    pub vessel_definition_interval: Duration,
    /// Remote vessels closer than this to the local player (in meters) are
    /// not instantiated while in flight
    pub safety_bubble_radius: f64,
    /// How long inbound definitions for a destroyed vessel keep being ignored
    pub removal_grace: Duration,
}

impl SyncConfig {
    /// Applies the broadcast cadence the server sent during the handshake
    pub fn with_server_settings(mut self, vessel_parts_sync_ms: u64) -> Self {
        self.vessel_definition_interval = Duration::from_millis(vessel_parts_sync_ms);
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            load_interval: Duration::from_millis(2000),
            refresh_interval: Duration::from_millis(1000),
            refresh_debounce: Duration::from_millis(1500),
            debris_cleanup_interval: Duration::from_millis(1000),
            own_vessel_check_interval: Duration::from_millis(1000),
            vessel_definition_interval: Duration::from_millis(2500),
            safety_bubble_radius: 100.0,
            removal_grace: Duration::from_secs(5),
        }
    }
}
