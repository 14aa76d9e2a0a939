//! Failures resolving an oracle request.

use super::transport::TransportError;
use crate::games::connect_four::MoveError;
use crate::turn::AgentId;

/// An oracle request resolved without a move being applied.
///
/// Every variant leaves the board unchanged and the pending request
/// cleared; the game stays on the current seat.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum OracleError {
    /// The exchange itself failed.
    #[display("Transport error: {}", _0)]
    Transport(TransportError),

    /// The oracle answered with a column the board rejects.
    #[display("Protocol error: agent {} chose column {}: {}", agent, column, reason)]
    Protocol {
        /// Agent that answered.
        agent: AgentId,
        /// Column as sent by the oracle.
        column: i64,
        /// Why the drop was rejected.
        reason: MoveError,
    },

    /// The ticket does not belong to the outstanding request.
    #[display("Oracle ticket does not match the pending request")]
    StaleTicket,
}

impl OracleError {
    /// Short label used to tell failures apart in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            OracleError::Transport(_) => "transport",
            OracleError::Protocol { .. } => "protocol",
            OracleError::StaleTicket => "stale_ticket",
        }
    }
}

impl std::error::Error for OracleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OracleError::Transport(e) => Some(e),
            OracleError::Protocol { reason, .. } => Some(reason),
            OracleError::StaleTicket => None,
        }
    }
}

impl From<TransportError> for OracleError {
    fn from(e: TransportError) -> Self {
        OracleError::Transport(e)
    }
}
