//! Game state: board plus outcome, advanced one drop at a time.

use super::action::{MoveError, Placement};
use super::rules;
use super::{Board, Seat};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Outcome of a game.
///
/// Terminal outcomes (`Won`, `Draw`) never return to `InProgress`; only
/// a fresh [`GameState`] does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Game is ongoing with the given seat to move.
    InProgress(Seat),
    /// A seat completed a line.
    Won(Seat),
    /// Board filled without a line.
    Draw,
}

impl Outcome {
    /// True for `Won` and `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress(_))
    }

    /// The seat to move, if the game is still going.
    pub fn active_seat(&self) -> Option<Seat> {
        match self {
            Outcome::InProgress(seat) => Some(*seat),
            _ => None,
        }
    }

    /// The winner, if there is one.
    pub fn winner(&self) -> Option<Seat> {
        match self {
            Outcome::Won(seat) => Some(*seat),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::InProgress(seat) => write!(f, "{} to move", seat),
            Outcome::Won(seat) => write!(f, "{} wins", seat),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    outcome: Outcome,
    last_move: Option<Placement>,
}

impl GameState {
    /// Creates a new game: empty board, seat one to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            outcome: Outcome::InProgress(Seat::One),
            last_move: None,
        }
    }

    /// Resumes from an existing position with `to_move` next.
    ///
    /// The outcome is recomputed from the board, so a position that
    /// already holds a line or is full comes back terminal.
    #[instrument(skip(board))]
    pub fn resume(board: Board, to_move: Seat) -> Self {
        let outcome = Self::judge(&board, to_move.opponent());
        Self {
            board,
            outcome,
            last_move: None,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns the seat to move, if the game is in progress.
    pub fn active_seat(&self) -> Option<Seat> {
        self.outcome.active_seat()
    }

    /// Returns the most recent drop.
    pub fn last_move(&self) -> Option<Placement> {
        self.last_move
    }

    /// True once the game is won or drawn.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Drops the active seat's token into `column` and returns the next state.
    ///
    /// Order after the drop: line scan, then full-board check, then seat
    /// flip. A drop that both completes a line and fills the board is a
    /// win. `self` is unchanged on error.
    #[instrument(skip(self), fields(outcome = %self.outcome))]
    pub fn apply(&self, column: usize) -> Result<GameState, MoveError> {
        let Outcome::InProgress(seat) = self.outcome else {
            return Err(MoveError::GameOver);
        };

        let mut board = self.board;
        let row = rules::drop::apply(&mut board, column, seat)?;
        let outcome = Self::judge(&board, seat);

        debug!(%seat, column, row, %outcome, "Drop applied");
        if outcome.is_terminal() {
            info!(%outcome, "Game finished");
        }

        Ok(GameState {
            board,
            outcome,
            last_move: Some(Placement { seat, row, column }),
        })
    }

    /// Outcome of `board` right after `mover` dropped a token.
    fn judge(board: &Board, mover: Seat) -> Outcome {
        if let Some(winner) = rules::win::scan(board) {
            Outcome::Won(winner)
        } else if rules::draw::is_draw(board) {
            Outcome::Draw
        } else {
            Outcome::InProgress(mover.opponent())
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
