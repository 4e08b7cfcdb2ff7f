//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};

use super::draw::is_full;
use crate::types::{Board, Cell, Mark};

/// Three cell indices that win when held by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinLine([usize; 3]);

impl WinLine {
    /// The three cell indices, in increasing order.
    pub const fn cells(&self) -> [usize; 3] {
        self.0
    }

    /// Checks if the line passes through `index`.
    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

/// All win lines: rows, then columns, then diagonals.
///
/// Evaluation order follows this array.
pub const WIN_LINES: [WinLine; 8] = [
    // Rows
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    // Columns
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    // Diagonals
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

/// Result of evaluating a board snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// No line completed and empty cells remain.
    Ongoing,
    /// A mark holds a whole line.
    Win(Mark, WinLine),
    /// Board full with no completed line.
    Draw,
}

impl Outcome {
    /// Returns true for a win or a draw.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// Returns the winning mark if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Win(mark, _) => Some(*mark),
            _ => None,
        }
    }

    /// Returns the completed line if there is one.
    pub fn line(&self) -> Option<WinLine> {
        match self {
            Outcome::Win(_, line) => Some(*line),
            _ => None,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Ongoing => write!(f, "In progress"),
            Outcome::Win(Mark::Player, _) => write!(f, "Player wins"),
            Outcome::Win(Mark::Opponent, _) => write!(f, "AI wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Evaluates a board.
pub fn evaluate(board: &Board) -> Outcome {
    evaluate_cells(board.cells())
}

/// Evaluates raw cells.
///
/// When several lines are complete (only possible on a board that was not
/// built by legal play) the first line in [`WIN_LINES`] order is reported.
pub fn evaluate_cells(cells: &[Cell; 9]) -> Outcome {
    for line in WIN_LINES {
        let [a, b, c] = line.cells();
        if let Cell::Occupied(mark) = cells[a]
            && cells[b] == cells[a]
            && cells[c] == cells[a]
        {
            return Outcome::Win(mark, line);
        }
    }

    if is_full(cells) {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// Finds the empty cell that completes a line for `threat`.
///
/// Scans [`WIN_LINES`] in order and returns the empty index of the first line
/// holding exactly two `threat` marks and one empty cell.
pub fn find_block(cells: &[Cell; 9], threat: Mark) -> Option<usize> {
    WIN_LINES.iter().find_map(|line| {
        let idx = line.cells();
        let marked = idx.iter().filter(|&&i| cells[i] == Cell::Occupied(threat)).count();
        let mut empty = idx.iter().copied().filter(|&i| cells[i] == Cell::Empty);
        match (marked, empty.next(), empty.next()) {
            (2, Some(i), None) => Some(i),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Cell = Cell::Occupied(Mark::Player);
    const O: Cell = Cell::Occupied(Mark::Opponent);
    const E: Cell = Cell::Empty;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(evaluate(&Board::new()), Outcome::Ongoing);
    }

    #[test]
    fn test_winner_top_row() {
        let cells = [X, X, X, O, O, E, E, E, E];
        assert_eq!(evaluate_cells(&cells), Outcome::Win(Mark::Player, WIN_LINES[0]));
    }

    #[test]
    fn test_winner_anti_diagonal() {
        let cells = [X, X, O, E, O, E, O, X, E];
        let outcome = evaluate_cells(&cells);
        assert_eq!(outcome.winner(), Some(Mark::Opponent));
        assert_eq!(outcome.line().map(|l| l.cells()), Some([2, 4, 6]));
    }

    #[test]
    fn test_no_winner_incomplete() {
        assert_eq!(evaluate_cells(&[X, X, E, O, E, E, E, E, E]), Outcome::Ongoing);
    }

    #[test]
    fn test_two_lines_reports_first_in_order() {
        // Not reachable by legal play: both the top row and left column.
        let cells = [X, X, X, X, O, O, X, O, O];
        assert_eq!(evaluate_cells(&cells), Outcome::Win(Mark::Player, WIN_LINES[0]));
    }

    #[test]
    fn test_evaluate_ignores_history() {
        let mut a = Board::new();
        let mut b = Board::new();
        for (i, m) in [(0, Mark::Player), (4, Mark::Opponent), (8, Mark::Player)] {
            a.place(i, m).unwrap();
        }
        for (i, m) in [(8, Mark::Player), (4, Mark::Opponent), (0, Mark::Player)] {
            b.place(i, m).unwrap();
        }
        assert_eq!(a, b);
        assert_eq!(evaluate(&a), evaluate(&b));
    }

    #[test]
    fn test_find_block_top_row() {
        let cells = [X, X, E, O, O, E, E, E, E];
        assert_eq!(find_block(&cells, Mark::Player), Some(2));
        // O's own threat on the middle row is at 5.
        assert_eq!(find_block(&cells, Mark::Opponent), Some(5));
    }

    #[test]
    fn test_find_block_ignores_dead_lines() {
        let cells = [X, X, O, E, E, E, E, E, E];
        assert_eq!(find_block(&cells, Mark::Player), None);
    }
}
