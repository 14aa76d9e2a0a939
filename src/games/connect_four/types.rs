//! Core domain types for connect four.

use serde::{Deserialize, Serialize};

/// Number of rows on the board. Row 0 is the top.
pub const ROWS: usize = 6;

/// Number of columns on the board.
pub const COLS: usize = 7;

/// One of the two competing seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Seat one (moves first).
    One,
    /// Seat two.
    Two,
}

impl Seat {
    /// Returns the other seat.
    pub fn opponent(self) -> Self {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }

    /// Seat number as used on the wire (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Seat::One => 1,
            Seat::Two => 2,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.number())
    }
}

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// No token.
    Empty,
    /// Token belonging to a seat.
    Occupied(Seat),
}

impl Cell {
    /// Wire digit for this cell: `0` empty, `1`/`2` for the seats.
    pub fn digit(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Occupied(Seat::One) => '1',
            Cell::Occupied(Seat::Two) => '2',
        }
    }

    /// Parses a wire digit.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Cell::Empty),
            '1' => Some(Cell::Occupied(Seat::One)),
            '2' => Some(Cell::Occupied(Seat::Two)),
            _ => None,
        }
    }

    /// Returns the seat owning this cell, if any.
    pub fn seat(self) -> Option<Seat> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(seat) => Some(seat),
        }
    }
}

/// 6x7 connect four board.
///
/// Within any column the occupied cells form a contiguous run anchored
/// at the bottom row. Only [`rules::drop::apply`](super::rules::drop::apply)
/// places tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Builds a board from raw rows, top row first.
    ///
    /// Callers must have checked the gravity invariant.
    pub(crate) fn from_rows(cells: [[Cell; COLS]; ROWS]) -> Self {
        Self { cells }
    }

    /// Gets the cell at `(row, col)`, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Returns all rows, top row first.
    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }

    /// Checks if a column cannot take another token.
    ///
    /// Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        !matches!(self.get(0, col), Some(Cell::Empty))
    }

    /// Number of tokens on the board.
    pub fn occupied(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| **cell != Cell::Empty)
            .count()
    }

    /// First cell that breaks the gravity invariant (a token above an
    /// empty cell), scanning columns left to right.
    pub fn floating_cell(&self) -> Option<(usize, usize)> {
        for col in 0..COLS {
            for row in 0..ROWS - 1 {
                if self.cells[row][col] != Cell::Empty && self.cells[row + 1][col] == Cell::Empty {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// Formats the board as plain text, one line per row, with a column
    /// index footer.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in &self.cells {
            result.push('|');
            for cell in row {
                let symbol = match cell {
                    Cell::Empty => '.',
                    Cell::Occupied(Seat::One) => 'X',
                    Cell::Occupied(Seat::Two) => 'O',
                };
                result.push(' ');
                result.push(symbol);
            }
            result.push_str(" |\n");
        }
        result.push(' ');
        for col in 0..COLS {
            result.push_str(&format!(" {}", col));
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Some(Cell::Empty));
            }
        }
        assert_eq!(board.occupied(), 0);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new();
        assert_eq!(board.get(ROWS, 0), None);
        assert_eq!(board.get(0, COLS), None);
        assert!(board.is_column_full(COLS));
    }

    #[test]
    fn test_seat_numbers() {
        assert_eq!(Seat::One.opponent(), Seat::Two);
        assert_eq!(Seat::Two.opponent(), Seat::One);
        assert_eq!(Seat::Two.number(), 2);
        assert_eq!(Seat::One.to_string(), "Seat 1");
    }

    #[test]
    fn test_cell_digits() {
        assert_eq!(Cell::from_digit('2'), Some(Cell::Occupied(Seat::Two)));
        assert_eq!(Cell::Occupied(Seat::One).digit(), '1');
        assert_eq!(Cell::from_digit('3'), None);
        assert_eq!(Cell::Empty.seat(), None);
    }

    #[test]
    fn test_floating_cell_detected() {
        let mut board = Board::new();
        board.set(3, 4, Cell::Occupied(Seat::One));
        assert_eq!(board.floating_cell(), Some((3, 4)));

        let mut settled = Board::new();
        settled.set(5, 4, Cell::Occupied(Seat::One));
        assert_eq!(settled.floating_cell(), None);
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set(5, 0, Cell::Occupied(Seat::One));
        board.set(5, 1, Cell::Occupied(Seat::Two));
        let text = board.display();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 1);
        assert_eq!(lines[0], "| . . . . . . . |");
        assert_eq!(lines[5], "| X O . . . . . |");
        assert_eq!(lines[6], "  0 1 2 3 4 5 6");
    }
}
