//! Lobby system - multi-screen TUI with the menu, the board and high scores.

mod controller;
mod screen;
mod screens;
mod state;

pub use controller::LobbyController;
pub use screen::{Screen, ScreenTransition};
pub use screens::{
    HighScoresScreen, InGameScreen, MenuScreen, round_line, score_line, status_line,
};
pub use state::LobbyState;
