//! The external move oracle: transport, requests and the AI coordinator.

mod coordinator;
mod error;
mod http;
mod request;
mod roster;
mod transport;

pub use coordinator::AiCoordinator;
pub use error::OracleError;
pub use http::HttpOracle;
pub use request::{MoveRequest, OracleMove, SearchLimits};
pub use roster::Roster;
pub use transport::{OracleTransport, TransportError};
