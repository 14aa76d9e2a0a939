//! Move types for connect four.
//!
//! A move is a seat dropping a token into a column. Placements record
//! where the token came to rest.

use super::{COLS, Seat};
use serde::{Deserialize, Serialize};

/// Where a dropped token landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Placement {
    /// The seat that dropped the token.
    pub seat: Seat,
    /// Row the token landed in (0 is the top).
    pub row: usize,
    /// Column the token was dropped into.
    pub column: usize,
}

impl std::fmt::Display for Placement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> column {} (row {})", self.seat, self.column, self.row)
    }
}

/// Error that can occur when applying a drop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Column index is outside `[0, 7)`.
    #[display("Column {} is out of range [0, {})", _0, COLS)]
    InvalidColumn(i64),

    /// The top cell of the column is already occupied.
    #[display("Column {} is full", _0)]
    ColumnFull(usize),

    /// The game is already over.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
