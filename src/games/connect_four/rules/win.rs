//! Win detection logic for connect four.

use super::super::{Board, COLS, Cell, ROWS, Seat};
use tracing::instrument;

/// Tokens in a row needed to win.
pub const LINE_LENGTH: usize = 4;

/// Scan orientations as `(row step, column step)`, in scan order:
/// horizontal, vertical, diagonal down-right, diagonal up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

/// Checks the whole board for four equal tokens in a line.
///
/// Orientations are scanned in a fixed order (horizontal, vertical, ↘, ↗),
/// row-major within each, and the first completed line decides the result.
/// No state is carried between calls.
#[instrument(skip(board))]
pub fn scan(board: &Board) -> Option<Seat> {
    for (d_row, d_col) in DIRECTIONS {
        for row in 0..ROWS {
            for col in 0..COLS {
                if let Some(seat) = line_from(board, row, col, d_row, d_col) {
                    return Some(seat);
                }
            }
        }
    }
    None
}

/// Returns the seat owning a complete line starting at `(row, col)`.
fn line_from(board: &Board, row: usize, col: usize, d_row: isize, d_col: isize) -> Option<Seat> {
    let seat = board.get(row, col)?.seat()?;
    let complete = (1..LINE_LENGTH as isize).all(|step| {
        let cell = row
            .checked_add_signed(d_row * step)
            .zip(col.checked_add_signed(d_col * step))
            .and_then(|(r, c)| board.get(r, c));
        cell == Some(Cell::Occupied(seat))
    });
    complete.then_some(seat)
}
