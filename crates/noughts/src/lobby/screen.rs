//! Screen trait and transition type for the lobby state machine.

use crossterm::event::KeyEvent;
use noughts_core::MatchConfig;
use ratatui::Frame;

use crate::lobby::state::LobbyState;

/// The result of handling an input event on a screen.
///
/// Screens return this from [`Screen::handle_key`] to drive the
/// [`LobbyController`](crate::LobbyController) state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenTransition {
    /// Stay on the current screen.
    Stay,
    /// Navigate to the main menu.
    GoToMenu,
    /// Navigate to the high-score tables.
    GoToHighScores,
    /// Start a match and show the board.
    StartMatch {
        /// Name recorded with the final score.
        player_name: String,
        /// Chosen mode and difficulty.
        config: MatchConfig,
    },
    /// Place the player's mark at a board index.
    PlaceMark(usize),
    /// Clear the board of the round in progress.
    ResetBoard,
    /// Flip the music flag.
    ToggleMusic,
    /// Drop the running match and return to the menu.
    AbandonToMenu,
    /// Exit the lobby application cleanly.
    Quit,
}

/// Trait implemented by each screen in the lobby state machine.
///
/// Each screen owns its own view state, renders its UI, and handles key
/// events. The controller calls these methods in the event loop.
pub trait Screen {
    /// Renders the screen into the provided [`Frame`].
    fn render(&self, frame: &mut Frame, lobby: &LobbyState);

    /// Handles a key event and returns the resulting [`ScreenTransition`].
    fn handle_key(&mut self, key: KeyEvent, lobby: &LobbyState) -> ScreenTransition;
}
