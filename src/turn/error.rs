//! Validation errors raised by the turn coordinator.

use super::controller::{AgentId, ControllerKind};
use crate::games::connect_four::{MoveError, Seat};

/// A proposed action was rejected. The game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TurnError {
    /// The game is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// An oracle request is outstanding.
    #[display("An oracle request is already pending")]
    RequestPending,

    /// The proposing controller does not control the active seat.
    #[display("{} is controlled by {}, not {}", seat, expected, proposed)]
    WrongController {
        /// The active seat.
        seat: Seat,
        /// Controller kind bound to the active seat.
        expected: ControllerKind,
        /// Controller kind that proposed the move.
        proposed: ControllerKind,
    },

    /// An oracle request was asked for while a human seat is active.
    #[display("{} is not agent-controlled", _0)]
    NotAgentTurn(Seat),

    /// The agent is not on the oracle roster.
    #[display("Agent {} is not on the oracle roster", _0)]
    UnknownAgent(AgentId),

    /// The drop itself was illegal.
    #[display("Illegal move: {}", _0)]
    Move(MoveError),
}

impl std::error::Error for TurnError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TurnError::Move(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for TurnError {
    fn from(e: MoveError) -> Self {
        match e {
            MoveError::GameOver => TurnError::GameOver,
            other => TurnError::Move(other),
        }
    }
}
