//! Computer opponent strategies.
//!
//! Each difficulty maps to exactly one strategy; [`Opponent`] is the closed
//! set the match controller dispatches through.

mod blocking;
mod minimax;
mod random;

pub use blocking::BlockingStrategy;
pub use minimax::MinimaxStrategy;
pub use random::RandomStrategy;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::types::Board;

/// Move selection capability.
pub trait Strategy {
    /// Picks a cell index for the opponent's next move.
    ///
    /// Returns `None` only when the board has no empty cell. Callers only ask
    /// for a move while the round is ongoing.
    fn select_move(&mut self, board: &Board) -> Option<usize>;
}

/// Opponent difficulty.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random moves.
    #[default]
    Easy,
    /// Blocks an imminent human win, otherwise random.
    Medium,
    /// Exhaustive search; never loses.
    Hard,
}

/// The opponent for one difficulty.
#[derive(Debug, Clone)]
pub enum Opponent {
    /// Easy.
    Random(RandomStrategy),
    /// Medium.
    Blocking(BlockingStrategy),
    /// Hard.
    Minimax(MinimaxStrategy),
}

impl Opponent {
    /// Builds the opponent for `difficulty`.
    ///
    /// With a seed the random choices are reproducible; without one the
    /// generator is seeded from the OS.
    #[instrument]
    pub fn for_difficulty(difficulty: Difficulty, seed: Option<u64>) -> Self {
        let random = match seed {
            Some(seed) => RandomStrategy::new(seed),
            None => RandomStrategy::from_entropy(),
        };
        match difficulty {
            Difficulty::Easy => Opponent::Random(random),
            Difficulty::Medium => Opponent::Blocking(BlockingStrategy::new(random)),
            Difficulty::Hard => Opponent::Minimax(MinimaxStrategy::new()),
        }
    }

    /// The difficulty this opponent plays at.
    pub fn difficulty(&self) -> Difficulty {
        match self {
            Opponent::Random(_) => Difficulty::Easy,
            Opponent::Blocking(_) => Difficulty::Medium,
            Opponent::Minimax(_) => Difficulty::Hard,
        }
    }
}

impl Strategy for Opponent {
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        match self {
            Opponent::Random(s) => s.select_move(board),
            Opponent::Blocking(s) => s.select_move(board),
            Opponent::Minimax(s) => s.select_move(board),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!(Difficulty::from_str("hard"), Ok(Difficulty::Hard));
        assert_eq!(Difficulty::from_str("Medium"), Ok(Difficulty::Medium));
        assert!(Difficulty::from_str("impossible").is_err());
    }

    #[test]
    fn test_opponent_matches_difficulty() {
        use strum::IntoEnumIterator;
        for difficulty in Difficulty::iter() {
            let opponent = Opponent::for_difficulty(difficulty, Some(1));
            assert_eq!(opponent.difficulty(), difficulty);
        }
    }
}
