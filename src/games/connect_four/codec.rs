//! Wire encoding of boards.
//!
//! A board is rendered as one string per row, top row first, with one
//! digit per cell (`0` empty, `1` seat one, `2` seat two). Rows are
//! joined by [`ROW_SEPARATOR`]:
//!
//! ```text
//! 0000000;0000000;0000000;0000000;0000000;0001000
//! ```

use super::{Board, COLS, Cell, ROWS};
use tracing::instrument;

/// Separator placed between encoded rows.
pub const ROW_SEPARATOR: char = ';';

/// Encodes a board as its row-joined digit string.
pub fn encode(board: &Board) -> String {
    board
        .rows()
        .iter()
        .map(|row| row.iter().map(|cell| cell.digit()).collect::<String>())
        .collect::<Vec<_>>()
        .join(&ROW_SEPARATOR.to_string())
}

/// Decodes a row-joined digit string.
///
/// Rows may be separated by `;` or by newlines; empty segments are
/// ignored. The decoded board must satisfy the gravity invariant.
#[instrument]
pub fn decode(encoded: &str) -> Result<Board, BoardParseError> {
    let rows: Vec<&str> = encoded
        .split([ROW_SEPARATOR, '\n'])
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();

    if rows.len() != ROWS {
        return Err(BoardParseError::RowCount(rows.len()));
    }

    let mut cells = [[Cell::Empty; COLS]; ROWS];
    for (row, line) in rows.iter().enumerate() {
        let digits: Vec<char> = line.chars().collect();
        if digits.len() != COLS {
            return Err(BoardParseError::RowLength {
                row,
                found: digits.len(),
            });
        }
        for (col, digit) in digits.into_iter().enumerate() {
            cells[row][col] =
                Cell::from_digit(digit).ok_or(BoardParseError::InvalidCell { row, col, digit })?;
        }
    }

    let board = Board::from_rows(cells);
    if let Some((row, col)) = board.floating_cell() {
        return Err(BoardParseError::Floating { row, col });
    }
    Ok(board)
}

/// Error decoding a board string.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// Wrong number of rows.
    #[display("Expected {} rows, found {}", ROWS, _0)]
    RowCount(usize),

    /// A row has the wrong number of cells.
    #[display("Row {} has {} cells, expected {}", row, found, COLS)]
    RowLength {
        /// Offending row.
        row: usize,
        /// Cells found.
        found: usize,
    },

    /// A cell is not one of `0`, `1`, `2`.
    #[display("Invalid cell {:?} at row {}, column {}", digit, row, col)]
    InvalidCell {
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// Character found.
        digit: char,
    },

    /// A token sits above an empty cell.
    #[display("Token at row {}, column {} is floating", row, col)]
    Floating {
        /// Row of the token.
        row: usize,
        /// Column of the token.
        col: usize,
    },
}

impl std::error::Error for BoardParseError {}
