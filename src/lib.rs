//! Strictly Connect Four - turn-coordinated connect four
//!
//! Two seats play on a 6x7 gravity-drop board. Each seat is controlled by
//! a human or by an agent whose moves come from a remote move oracle.
//!
//! # Architecture
//!
//! - **Games**: board, drop rule, line and draw detection, board codec
//! - **Turn**: controllers and the turn coordinator, which owns the
//!   single outstanding oracle request
//! - **Oracle**: transport trait, HTTP transport, roster and AI coordinator
//! - **Orchestrator**: event loop tying human commands and oracle replies
//!   together
//!
//! # Example
//!
//! ```
//! use strictly_connect_four::{Controller, Outcome, Seat, Seats, TurnCoordinator};
//!
//! let mut turn = TurnCoordinator::new(Seats::new(Controller::Human, Controller::Human));
//! let outcome = turn.attempt_human_move(3).unwrap();
//! assert_eq!(outcome, Outcome::InProgress(Seat::Two));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod games;
pub mod oracle;
pub mod orchestrator;
pub mod turn;

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, ORACLE_URL_ENV, OracleConfig};

// Crate-level exports - Game types
pub use games::connect_four::{
    Board, BoardParseError, COLS, Cell, GameState, MoveError, Outcome, Placement, ROWS, Seat,
};

// Crate-level exports - Turn coordination
pub use turn::{AgentId, Controller, ControllerKind, OracleTicket, Seats, TurnCoordinator, TurnError};

// Crate-level exports - Oracle
pub use oracle::{
    AiCoordinator, HttpOracle, MoveRequest, OracleError, OracleMove, OracleTransport, Roster,
    SearchLimits, TransportError,
};

// Crate-level exports - Orchestration
pub use orchestrator::{Command, GameEvent, Orchestrator};
