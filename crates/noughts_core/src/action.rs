//! Move rejection reasons.

use crate::types::Mark;

/// Error returned when a placement is refused.
///
/// A refused move never changes the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InvalidMove {
    /// The cell already holds a mark.
    #[display("Cell {} is already occupied", _0)]
    Occupied(usize),

    /// The index is outside 0-8.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The round already has a winner or is drawn.
    #[display("Round is already over")]
    RoundOver,

    /// It is the other side's turn.
    #[display("It's not {:?}'s turn", _0)]
    NotYourTurn(Mark),
}

impl std::error::Error for InvalidMove {}
