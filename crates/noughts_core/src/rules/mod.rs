//! Game rules for tic-tac-toe.
//!
//! Pure functions over a board snapshot. Everything here takes a raw
//! `[Cell; 9]` buffer as well as a [`Board`](crate::Board) so the search can
//! evaluate hypothetical positions without touching the live board.

mod draw;
mod win;

pub use draw::is_full;
pub use win::{WIN_LINES, Outcome, WinLine, evaluate, evaluate_cells, find_block};
