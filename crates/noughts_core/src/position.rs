//! Named board positions for input and display.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::instrument;

use crate::types::Board;

/// A position on the tic-tac-toe board (0-8, row-major).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Position {
    /// Top-left (position 0)
    TopLeft,
    /// Top-center (position 1)
    TopCenter,
    /// Top-right (position 2)
    TopRight,
    /// Middle-left (position 3)
    MiddleLeft,
    /// Center (position 4)
    Center,
    /// Middle-right (position 5)
    MiddleRight,
    /// Bottom-left (position 6)
    BottomLeft,
    /// Bottom-center (position 7)
    BottomCenter,
    /// Bottom-right (position 8)
    BottomRight,
}

impl Position {
    /// Label for this position.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Board index (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row (0-2).
    pub fn row(self) -> usize {
        self.index() / 3
    }

    /// Column (0-2).
    pub fn col(self) -> usize {
        self.index() % 3
    }

    /// Creates a position from a board index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::iter().nth(index)
    }

    /// Creates a position from row and column.
    pub fn from_row_col(row: usize, col: usize) -> Option<Self> {
        if row < 3 && col < 3 {
            Self::from_index(row * 3 + col)
        } else {
            None
        }
    }

    /// Parses a board index (0-8) or a label, case-insensitively.
    #[instrument]
    pub fn parse(s: &str) -> Option<Position> {
        let s = s.trim();
        if let Ok(num) = s.parse::<usize>() {
            return Self::from_index(num);
        }
        let s_lower = s.to_lowercase();
        Self::iter().find(|pos| pos.label().to_lowercase() == s_lower)
    }

    /// Neighbour in a direction, wrapping around the grid edges.
    pub fn step(self, d_row: isize, d_col: isize) -> Self {
        let row = (self.row() as isize + d_row).rem_euclid(3) as usize;
        let col = (self.col() as isize + d_col).rem_euclid(3) as usize;
        Self::from_row_col(row, col).unwrap_or(self)
    }

    /// Positions whose cells are still empty.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::iter().filter(|pos| board.is_empty(pos.index())).collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Mark;

    #[test]
    fn test_index_round_trip() {
        for (i, pos) in Position::iter().enumerate() {
            assert_eq!(pos.index(), i);
            assert_eq!(Position::from_index(i), Some(pos));
        }
        assert_eq!(Position::from_index(9), None);
    }

    #[test]
    fn test_parse_number_and_label() {
        assert_eq!(Position::parse("4"), Some(Position::Center));
        assert_eq!(Position::parse("bottom-right"), Some(Position::BottomRight));
        assert_eq!(Position::parse("nowhere"), None);
    }

    #[test]
    fn test_step_wraps() {
        assert_eq!(Position::TopLeft.step(-1, 0), Position::BottomLeft);
        assert_eq!(Position::TopRight.step(0, 1), Position::TopLeft);
        assert_eq!(Position::Center.step(1, 1), Position::BottomRight);
    }

    #[test]
    fn test_valid_moves_skips_occupied() {
        let mut board = Board::new();
        board.place(4, Mark::Player).unwrap();
        let moves = Position::valid_moves(&board);
        assert_eq!(moves.len(), 8);
        assert!(!moves.contains(&Position::Center));
    }
}
