//! Screen implementations for the lobby state machine.

mod high_scores;
mod in_game;
mod menu;

pub use high_scores::HighScoresScreen;
pub use in_game::{InGameScreen, round_line, score_line, status_line};
pub use menu::MenuScreen;

use strum::IntoEnumIterator;

/// Returns the next (or previous) variant, wrapping around.
fn cycle<T: IntoEnumIterator + PartialEq + Copy>(current: T, forward: bool) -> T {
    let all: Vec<T> = T::iter().collect();
    let pos = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (pos + 1) % all.len()
    } else {
        (pos + all.len() - 1) % all.len()
    };
    all[next]
}

#[cfg(test)]
mod tests {
    use super::*;
    use noughts_core::{Difficulty, MatchMode};

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(cycle(MatchMode::BestOf20, true), MatchMode::BestOf5);
        assert_eq!(cycle(MatchMode::BestOf5, false), MatchMode::BestOf20);
        assert_eq!(cycle(Difficulty::Easy, true), Difficulty::Medium);
    }
}
