//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::action::InvalidMove;
use crate::rules::{self, Outcome};

/// Side that owns a mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// The human player (X, always moves first).
    Player,
    /// The computer opponent (O).
    Opponent,
}

impl Mark {
    /// Returns the other side.
    pub fn other(self) -> Self {
        match self {
            Mark::Player => Mark::Opponent,
            Mark::Opponent => Mark::Player,
        }
    }

    /// Symbol drawn for this mark.
    pub fn symbol(self) -> char {
        match self {
            Mark::Player => 'X',
            Mark::Opponent => 'O',
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    #[default]
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// The only mutation path is [`Board::place`], which keeps the marks strictly
/// alternating with [`Mark::Player`] first, so the side to move is derived
/// from the mark counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Board {
    /// Cells in row-major order (0-8).
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from raw cells.
    ///
    /// Returns `None` unless the mark counts are consistent with strict
    /// alternation (player count equal to or one more than opponent count).
    /// Line contents are not checked, so a board with two completed lines
    /// can still be built this way.
    pub fn from_cells(cells: [Cell; 9]) -> Option<Self> {
        let players = cells.iter().filter(|c| **c == Cell::Occupied(Mark::Player)).count();
        let opponents = cells.iter().filter(|c| **c == Cell::Occupied(Mark::Opponent)).count();
        (players == opponents || players == opponents + 1).then_some(Self { cells })
    }

    /// Gets the cell at the given index (0-8).
    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell is empty. Out-of-range indices are not empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.cell(index), Some(Cell::Empty))
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Indices of the empty cells in increasing order.
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.cells[i] == Cell::Empty).collect()
    }

    /// Number of marks placed so far.
    pub fn move_count(&self) -> usize {
        self.cells.iter().filter(|c| **c != Cell::Empty).count()
    }

    /// Mark whose turn it is.
    pub fn active_mark(&self) -> Mark {
        if self.move_count() % 2 == 0 {
            Mark::Player
        } else {
            Mark::Opponent
        }
    }

    /// Checks if every cell is occupied.
    pub fn is_full(&self) -> bool {
        rules::is_full(&self.cells)
    }

    /// Evaluates the current outcome.
    pub fn outcome(&self) -> Outcome {
        rules::evaluate_cells(&self.cells)
    }

    /// Places `mark` at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidMove`] if the round is already decided, the index is
    /// out of range, the cell is occupied, or it is not `mark`'s turn. The
    /// board is unchanged on error.
    #[instrument(skip(self), fields(board = %self))]
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), InvalidMove> {
        if self.outcome().is_terminal() {
            return Err(InvalidMove::RoundOver);
        }
        let cell = self.cell(index).ok_or(InvalidMove::OutOfBounds(index))?;
        if cell != Cell::Empty {
            return Err(InvalidMove::Occupied(index));
        }
        if mark != self.active_mark() {
            return Err(InvalidMove::NotYourTurn(mark));
        }
        self.cells[index] = Cell::Occupied(mark);
        Ok(())
    }

    /// Clears every cell; the player moves first again.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index + 1)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark.symbol())?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_player_moves_first() {
        let board = Board::new();
        assert_eq!(board.active_mark(), Mark::Player);
        assert_eq!(board.empty_cells().len(), 9);
    }

    #[test]
    fn test_place_alternates_turns() {
        let mut board = Board::new();
        board.place(4, Mark::Player).unwrap();
        assert_eq!(board.active_mark(), Mark::Opponent);
        board.place(0, Mark::Opponent).unwrap();
        assert_eq!(board.active_mark(), Mark::Player);
    }

    #[test]
    fn test_place_rejects_occupied_cell() {
        let mut board = Board::new();
        board.place(4, Mark::Player).unwrap();
        let before = board;
        assert_eq!(board.place(4, Mark::Opponent), Err(InvalidMove::Occupied(4)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_place_rejects_wrong_mark() {
        let mut board = Board::new();
        assert_eq!(
            board.place(0, Mark::Opponent),
            Err(InvalidMove::NotYourTurn(Mark::Opponent))
        );
    }

    #[test]
    fn test_place_rejects_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.place(9, Mark::Player), Err(InvalidMove::OutOfBounds(9)));
    }

    #[test]
    fn test_place_rejects_after_win() {
        let mut board = Board::new();
        for (index, mark) in [
            (0, Mark::Player),
            (3, Mark::Opponent),
            (1, Mark::Player),
            (4, Mark::Opponent),
            (2, Mark::Player),
        ] {
            board.place(index, mark).unwrap();
        }
        assert_eq!(board.place(5, Mark::Opponent), Err(InvalidMove::RoundOver));
        assert!(board.is_empty(5));
    }

    #[test]
    fn test_reset_matches_fresh_board() {
        let mut board = Board::new();
        board.place(0, Mark::Player).unwrap();
        board.place(8, Mark::Opponent).unwrap();
        board.place(4, Mark::Player).unwrap();
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.active_mark(), Mark::Player);

        board.reset();
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_reset_any_reachable_board() {
        fn walk(board: Board, seen: &mut std::collections::HashSet<Board>) {
            if !seen.insert(board) || board.outcome().is_terminal() {
                return;
            }
            for i in board.empty_cells() {
                let mut next = board;
                next.place(i, board.active_mark()).unwrap();
                walk(next, seen);
            }
        }

        let mut seen = std::collections::HashSet::new();
        walk(Board::new(), &mut seen);
        assert!(seen.iter().any(|b| b.outcome() == Outcome::Draw));
        assert!(seen.iter().any(|b| b.outcome().winner() == Some(Mark::Opponent)));

        for board in seen {
            let mut reset = board;
            reset.reset();
            assert_eq!(reset, Board::new(), "{board}");
            reset.reset();
            assert_eq!(reset, Board::new());
        }
    }

    #[test]
    fn test_from_cells_rejects_broken_alternation() {
        let x = Cell::Occupied(Mark::Player);
        let e = Cell::Empty;
        assert!(Board::from_cells([x, x, e, e, e, e, e, e, e]).is_none());
        assert!(Board::from_cells([x, e, e, e, e, e, e, e, e]).is_some());
    }

    #[test]
    fn test_display_numbers_empty_cells() {
        let mut board = Board::new();
        board.place(0, Mark::Player).unwrap();
        board.place(4, Mark::Opponent).unwrap();
        assert_eq!(board.to_string(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }
}
