//! Draw detection logic for connect four.

use super::super::{Board, COLS};
use super::win::scan;
use tracing::instrument;

/// Checks if the top row has no empty cell.
///
/// Given the gravity invariant this means the board is full.
#[instrument(skip(board))]
pub fn is_top_row_full(board: &Board) -> bool {
    (0..COLS).all(|col| board.is_column_full(col))
}

/// A full board with no completed line.
pub fn is_draw(board: &Board) -> bool {
    is_top_row_full(board) && scan(board).is_none()
}
