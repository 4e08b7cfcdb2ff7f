//! Noughts core - the tic-tac-toe match engine.
//!
//! Everything here is pure and synchronous: no I/O, no timers, no
//! process-wide state. A match is an explicit [`MatchController`] value that
//! owns its [`Board`] and [`MatchState`].
//!
//! # Architecture
//!
//! - **Board**: nine cells with strict mark alternation
//! - **Rules**: outcome evaluation over the eight fixed win lines
//! - **Strategy**: random, blocking and exhaustive-search opponents
//! - **Controller**: round sequencing, scoring and high-score hand-off
//!
//! # Example
//!
//! ```
//! use noughts_core::{Difficulty, MatchConfig, MatchController, MatchMode, Opponent};
//!
//! let config = MatchConfig::new(MatchMode::BestOf5, Difficulty::Hard);
//! let mut game = MatchController::with_opponent(
//!     config,
//!     "Ada".to_string(),
//!     Opponent::for_difficulty(Difficulty::Hard, Some(7)),
//! );
//!
//! let report = game.play(4).expect("center is free");
//! assert_eq!(*report.opponent_move(), Some(0));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod controller;
mod match_state;
mod position;
mod rules;
mod scores;
mod strategy;
mod types;

pub use action::InvalidMove;
pub use controller::{
    AdvanceTicket, MatchController, MatchError, MatchPhase, MatchSummary, RoundAdvance,
    TurnReport,
};
pub use match_state::{MatchConfig, MatchMode, MatchState};
pub use position::Position;
pub use rules::{WIN_LINES, Outcome, WinLine, evaluate, evaluate_cells, find_block, is_full};
pub use scores::{HighScoreRecord, HighScoreStore, HighScoreTable, MemoryHighScoreStore, StoreError};
pub use strategy::{
    BlockingStrategy, Difficulty, MinimaxStrategy, Opponent, RandomStrategy, Strategy,
};
pub use types::{Board, Cell, Mark};
