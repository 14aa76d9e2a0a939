//! Gravity drop: the only operation that places tokens on a board.

use super::super::action::MoveError;
use super::super::{Board, COLS, Cell, ROWS, Seat};
use tracing::instrument;

/// Drops `seat`'s token into `column`, mutating the board in place.
///
/// Returns the row the token landed in. The board is left untouched when
/// the column is out of range or its top cell is occupied.
#[instrument(skip(board))]
pub fn apply(board: &mut Board, column: usize, seat: Seat) -> Result<usize, MoveError> {
    if column >= COLS {
        return Err(MoveError::InvalidColumn(column as i64));
    }

    if board.is_column_full(column) {
        return Err(MoveError::ColumnFull(column));
    }

    for row in (0..ROWS).rev() {
        if board.get(row, column) == Some(Cell::Empty) {
            board.set(row, column, Cell::Occupied(seat));
            return Ok(row);
        }
    }

    // Top cell was empty, so the scan always finds a slot.
    Err(MoveError::ColumnFull(column))
}
