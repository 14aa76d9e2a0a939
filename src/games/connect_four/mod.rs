//! Connect four: 6x7 gravity-drop board, four in a line wins.

mod action;
pub mod codec;
pub mod rules;
mod state;
mod types;

pub use action::{MoveError, Placement};
pub use codec::BoardParseError;
pub use state::{GameState, Outcome};
pub use types::{Board, COLS, Cell, ROWS, Seat};
