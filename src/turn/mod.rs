//! Seat controllers and the turn coordinator.

mod controller;
mod coordinator;
mod error;

pub use controller::{AgentId, Controller, ControllerKind, Seats};
pub use coordinator::{OracleTicket, TurnCoordinator};
pub use error::TurnError;
