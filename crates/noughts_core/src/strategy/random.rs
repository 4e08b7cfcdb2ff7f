//! Easy opponent: uniform choice among empty cells.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::Strategy;
use crate::types::Board;

/// Picks uniformly at random among the empty cells.
#[derive(Debug, Clone)]
pub struct RandomStrategy {
    rng: ChaCha8Rng,
}

impl RandomStrategy {
    /// Creates a strategy with a fixed seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a strategy seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl Strategy for RandomStrategy {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        let choice = board.empty_cells().choose(&mut self.rng).copied();
        debug!(choice = ?choice, "Random move");
        choice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_only_picks_empty_cells() {
        let mut board = Board::new();
        let mut strategy = RandomStrategy::new(3);
        for _ in 0..4 {
            let p = strategy.select_move(&board).unwrap();
            board.place(p, board.active_mark()).unwrap();
        }
        for _ in 0..20 {
            let pick = strategy.select_move(&board).unwrap();
            assert!(board.is_empty(pick));
        }
    }

    #[test]
    fn test_same_seed_same_moves() {
        let board = Board::new();
        let mut a = RandomStrategy::new(42);
        let mut b = RandomStrategy::new(42);
        let xs: Vec<_> = (0..10).map(|_| a.select_move(&board)).collect();
        let ys: Vec<_> = (0..10).map(|_| b.select_move(&board)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_last_empty_cell_is_forced() {
        let mut board = Board::new();
        // X O X / X O O / O X _
        for (i, m) in [
            (0, Mark::Player),
            (1, Mark::Opponent),
            (2, Mark::Player),
            (4, Mark::Opponent),
            (3, Mark::Player),
            (5, Mark::Opponent),
            (7, Mark::Player),
            (6, Mark::Opponent),
        ] {
            board.place(i, m).unwrap();
        }
        assert_eq!(RandomStrategy::new(0).select_move(&board), Some(8));
    }

    #[test]
    fn test_full_board_has_no_move() {
        let x = crate::types::Cell::Occupied(Mark::Player);
        let o = crate::types::Cell::Occupied(Mark::Opponent);
        let board = Board::from_cells([x, o, x, o, x, x, o, x, o]).unwrap();
        assert_eq!(RandomStrategy::new(0).select_move(&board), None);
    }
}
