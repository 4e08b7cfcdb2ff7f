//! Draw detection logic for tic-tac-toe.

use crate::types::Cell;

/// Checks if all cells are occupied.
///
/// A full board with no winner is a draw.
pub fn is_full(cells: &[Cell; 9]) -> bool {
    cells.iter().all(|c| *c != Cell::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Outcome, evaluate_cells};
    use crate::types::Mark;

    const X: Cell = Cell::Occupied(Mark::Player);
    const O: Cell = Cell::Occupied(Mark::Opponent);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&[E; 9]));
    }

    #[test]
    fn test_partial_board_not_full() {
        assert!(!is_full(&[X, O, E, E, E, E, E, E, E]));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // X O X / O X X / O X O
        let cells = [X, O, X, O, X, X, O, X, O];
        assert!(is_full(&cells));
        assert_eq!(evaluate_cells(&cells), Outcome::Draw);
    }

    #[test]
    fn test_full_board_with_line_is_win() {
        // X X X / O O X / X O O
        let cells = [X, X, X, O, O, X, X, O, O];
        assert!(is_full(&cells));
        assert!(matches!(evaluate_cells(&cells), Outcome::Win(Mark::Player, _)));
    }
}
