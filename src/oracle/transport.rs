//! Oracle transport trait and its failure modes.

use super::request::{MoveRequest, OracleMove};
use crate::turn::AgentId;

/// The two logical operations the oracle offers.
///
/// Implementations perform exactly one exchange per call and never retry.
#[async_trait::async_trait]
pub trait OracleTransport: Send + Sync {
    /// "List agents": identities the oracle can play as, in oracle order.
    async fn list_agents(&self) -> Result<Vec<AgentId>, TransportError>;

    /// "Choose move": asks the oracle for a column.
    async fn choose_move(&self, request: &MoveRequest) -> Result<OracleMove, TransportError>;
}

/// The exchange with the oracle failed before a usable answer arrived.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TransportError {
    /// The oracle URL could not be built.
    #[display("Invalid oracle endpoint: {}", _0)]
    InvalidEndpoint(String),

    /// Connection or I/O failure.
    #[display("Oracle unreachable: {}", _0)]
    Unreachable(String),

    /// Non-success HTTP status.
    #[display("Oracle returned HTTP {}: {}", status, body)]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Payload could not be decoded.
    #[display("Malformed oracle payload: {}", _0)]
    Malformed(String),

    /// The oracle answered but reported failure.
    #[display("Oracle rejected the request: {}", _0)]
    Rejected(String),
}

impl std::error::Error for TransportError {}
