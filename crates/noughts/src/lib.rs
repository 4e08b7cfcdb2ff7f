//! Noughts - terminal tic-tac-toe against a computer opponent.
//!
//! The match engine lives in `noughts_core`; this crate adds what a playable
//! program needs around it.
//!
//! # Architecture
//!
//! - **Settings**: TOML settings with defaults
//! - **Store**: high scores kept in a JSON file
//! - **Timer**: the cancellable pause between rounds
//! - **Lobby**: ratatui screens driven by a key-event state machine
//!
//! # Example
//!
//! ```no_run
//! use noughts::{JsonHighScoreStore, LobbyController, LobbyState, Settings};
//! use noughts_core::{Difficulty, MatchMode};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::resolve(None)?;
//! let store = JsonHighScoreStore::new(settings.high_score_path().clone());
//! let state = LobbyState::new(settings, store, None);
//! let _lobby = LobbyController::new(state, "Ada".to_string(), MatchMode::BestOf5, Difficulty::Hard);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod lobby;
mod settings;
mod store;
mod timer;

pub use lobby::{
    HighScoresScreen, InGameScreen, LobbyController, LobbyState, MenuScreen, Screen,
    ScreenTransition, round_line, score_line, status_line,
};
pub use settings::{CONFIG_ENV, ConfigError, DEFAULT_CONFIG_FILE, Settings};
pub use store::{JsonHighScoreStore, score_lines};
pub use timer::RoundTimer;
