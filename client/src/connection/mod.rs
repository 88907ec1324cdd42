mod gateway;
mod network_statistics;
mod state;

pub use gateway::{ConnectionGateway, SendOutcome};
pub use network_statistics::NetworkStatistics;
pub use state::{ConnectionState, ConnectionStateHandle};
