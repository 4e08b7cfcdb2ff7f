//! Hard opponent: exhaustive minimax search.
//!
//! The search works on a scratch copy of the cells. Every hypothetical mark
//! goes through [`with_mark`], which restores the cell before returning, so
//! the scratch buffer is back to the real position after each branch and the
//! live [`Board`] is never written.

use tracing::{debug, instrument};

use super::Strategy;
use crate::rules::{Outcome, evaluate_cells};
use crate::types::{Board, Cell, Mark};

/// Full-depth minimax for the opponent mark.
///
/// Terminal scores are +1 (opponent wins), -1 (player wins) and 0 (draw),
/// with no depth discount. Among equal scores the lowest index is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimaxStrategy;

impl MinimaxStrategy {
    /// Creates the strategy.
    pub fn new() -> Self {
        Self
    }

    /// Scores every empty cell for the opponent, in index order.
    pub fn score_moves(&self, board: &Board) -> Vec<(usize, i8)> {
        let mut scratch = *board.cells();
        (0..9)
            .filter(|&i| board.is_empty(i))
            .map(|i| {
                let score = with_mark(&mut scratch, i, Mark::Opponent, |cells| {
                    minimax(cells, Mark::Player)
                });
                (i, score)
            })
            .collect()
    }
}

impl Strategy for MinimaxStrategy {
    #[instrument(skip(self, board), fields(board = %board))]
    fn select_move(&mut self, board: &Board) -> Option<usize> {
        let mut best: Option<(usize, i8)> = None;
        for (index, score) in self.score_moves(board) {
            if best.is_none_or(|(_, top)| score > top) {
                best = Some((index, score));
            }
        }
        debug!(best = ?best, "Search complete");
        best.map(|(index, _)| index)
    }
}

/// Places `mark` at `index`, runs `f`, then clears the cell again.
fn with_mark<R>(
    cells: &mut [Cell; 9],
    index: usize,
    mark: Mark,
    f: impl FnOnce(&mut [Cell; 9]) -> R,
) -> R {
    cells[index] = Cell::Occupied(mark);
    let result = f(cells);
    cells[index] = Cell::Empty;
    result
}

/// Value of the position with `to_move` about to play.
fn minimax(cells: &mut [Cell; 9], to_move: Mark) -> i8 {
    match evaluate_cells(cells) {
        Outcome::Win(Mark::Opponent, _) => return 1,
        Outcome::Win(Mark::Player, _) => return -1,
        Outcome::Draw => return 0,
        Outcome::Ongoing => {}
    }

    let maximizing = to_move == Mark::Opponent;
    let mut best = if maximizing { i8::MIN } else { i8::MAX };
    for index in 0..9 {
        if cells[index] != Cell::Empty {
            continue;
        }
        let score = with_mark(cells, index, to_move, |c| minimax(c, to_move.other()));
        best = if maximizing {
            best.max(score)
        } else {
            best.min(score)
        };
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(moves: &[usize]) -> Board {
        let mut board = Board::new();
        for &m in moves {
            board.place(m, board.active_mark()).unwrap();
        }
        board
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X _ / O O _ / X _ _ : O completes the middle row.
        let board = board_from(&[0, 3, 1, 4, 6]);
        assert_eq!(MinimaxStrategy::new().select_move(&board), Some(5));
    }

    #[test]
    fn test_blocks_when_no_win() {
        // X X _ / _ O _ / _ _ _
        let board = board_from(&[0, 4, 1]);
        assert_eq!(MinimaxStrategy::new().select_move(&board), Some(2));
    }

    #[test]
    fn test_answers_center_with_first_corner() {
        let board = board_from(&[4]);
        assert_eq!(MinimaxStrategy::new().select_move(&board), Some(0));
    }

    #[test]
    fn test_edge_reply_to_center_loses() {
        let board = board_from(&[4]);
        let scores = MinimaxStrategy::new().score_moves(&board);
        for (index, score) in scores {
            let expected = if [0, 2, 6, 8].contains(&index) { 0 } else { -1 };
            assert_eq!(score, expected, "reply at {index}");
        }
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let board = board_from(&[0, 4, 8]);
        let before = board;
        MinimaxStrategy::new().select_move(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_with_mark_restores_cell() {
        let mut cells = [Cell::Empty; 9];
        let seen = with_mark(&mut cells, 3, Mark::Opponent, |c| c[3]);
        assert_eq!(seen, Cell::Occupied(Mark::Opponent));
        assert_eq!(cells, [Cell::Empty; 9]);
    }
}
