//! Medium opponent: one-ply defence.

use tracing::debug;

use super::{RandomStrategy, Strategy};
use crate::rules::find_block;
use crate::types::{Board, Mark};

/// Blocks the first line where the human is one mark from winning,
/// otherwise plays randomly. Never sets up its own threats.
#[derive(Debug, Clone)]
pub struct BlockingStrategy {
    fallback: RandomStrategy,
}

impl BlockingStrategy {
    /// Creates a blocking strategy that falls back to `fallback`.
    pub fn new(fallback: RandomStrategy) -> Self {
        Self { fallback }
    }
}

impl Strategy for BlockingStrategy {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        if let Some(index) = find_block(board.cells(), Mark::Player) {
            debug!(index, "Blocking player line");
            return Some(index);
        }
        self.fallback.select_move(board)
    }
}
