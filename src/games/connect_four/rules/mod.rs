//! Game rules for connect four.
//!
//! Pure functions over a [`Board`](super::Board): the gravity drop, the
//! full-board line scan and the draw check. [`GameState`](super::GameState)
//! composes them on every move.

pub mod draw;
pub mod drop;
pub mod win;

pub use draw::{is_draw, is_top_row_full};
pub use drop::apply;
pub use win::scan;
