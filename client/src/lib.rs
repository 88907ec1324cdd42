//! # Flotilla Client
//! Keeps a game client's copy of shared vessels in step with remote peers.
//! Outgoing envelopes go through a single dispatch queue drained by a
//! background sender loop; incoming definitions land in the vessel store and
//! are loaded, merged or removed by routines the host ticks once per frame.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use flotilla_shared::{
    Codec, CodecError, CompressionConfig, CompressionMode, DeliveryClass, Envelope, MessageData,
    MessageKind, Position, ProtoPart, ProtoVessel, Subspace, VesselId, VesselType,
};

mod client;
mod client_config;
mod connection;
mod error;
mod inbound;
mod sender;
mod sync;
mod transport;
mod world;

pub use client::SyncClient;
pub use client_config::{ClientConfig, ConnectionConfig, SyncConfig};
pub use connection::{
    ConnectionGateway, ConnectionState, ConnectionStateHandle, NetworkStatistics, SendOutcome,
};
pub use error::ClientError;
pub use inbound::{InboundEvent, InboundHandler};
pub use sender::{
    dispatch_queue, DispatchError, DispatchQueue, DispatchReceiver, ResetSignal, SenderLoop,
    SenderReport,
};
pub use sync::{routines, Routine, RoutineError, RoutineProfile, Scheduler, SyncContext, VesselProtoSystem};
pub use transport::{DisconnectAction, Transport, TransportError};
pub use world::{
    merge, Authority, ContentPolicy, DenialSink, Host, LiveVessel, LoadError, MergeError,
    MergeReport, PolicyDecision, RefreshGuard, RefreshMarker, RemovalCoordinator, Scene,
    SimulationView, StructuralDiff, VesselLoader, VesselRecord, VesselStatus, VesselStore,
};
