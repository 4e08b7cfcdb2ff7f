//! State shared by every lobby screen.

use derive_getters::Getters;
use noughts_core::{
    AdvanceTicket, MatchConfig, MatchController, MatchError, MatchPhase, RoundAdvance, TurnReport,
};
use tracing::{info, instrument};

use crate::settings::Settings;
use crate::store::JsonHighScoreStore;

/// The running match, the high-score store and the music flag.
///
/// Screens read it while rendering; the controller mutates it in response to
/// their transitions.
#[derive(Debug, Getters)]
pub struct LobbyState {
    settings: Settings,
    store: JsonHighScoreStore,
    game: Option<MatchController>,
    music_on: bool,
    seed: Option<u64>,
}

impl LobbyState {
    /// Creates the lobby state. `seed` makes opponent randomness repeatable.
    #[instrument(skip(settings, store))]
    pub fn new(settings: Settings, store: JsonHighScoreStore, seed: Option<u64>) -> Self {
        let music_on = *settings.music();
        Self {
            settings,
            store,
            game: None,
            music_on,
            seed,
        }
    }

    /// Starts a match, reusing the controller from an earlier one.
    #[instrument(skip(self))]
    pub fn start_match(
        &mut self,
        config: MatchConfig,
        player_name: String,
    ) -> Result<(), MatchError> {
        match self.game.as_mut() {
            Some(game) => game.start(config, player_name)?,
            None => self.game = Some(MatchController::new(config, player_name, self.seed)),
        }
        Ok(())
    }

    /// Plays the player's move in the running match.
    pub fn place(&mut self, index: usize) -> Result<TurnReport, MatchError> {
        self.game
            .as_mut()
            .ok_or(MatchError::NotInRound)?
            .play(index)
    }

    /// Clears the board of the round in progress.
    pub fn reset_board(&mut self) -> Result<(), MatchError> {
        self.game
            .as_mut()
            .ok_or(MatchError::NotInRound)?
            .restart_round()
    }

    /// Redeems a round-over ticket, saving the score when the match ends.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Result<RoundAdvance, MatchError> {
        let game = self.game.as_mut().ok_or(MatchError::NotInRound)?;
        game.advance_round(ticket, &mut self.store)
    }

    /// Drops the running match without saving.
    pub fn abandon(&mut self) {
        if let Some(game) = self.game.as_mut() {
            game.abandon();
        }
    }

    /// Flips the music flag.
    pub fn toggle_music(&mut self) -> bool {
        self.music_on = !self.music_on;
        info!(music_on = self.music_on, "Music toggled");
        self.music_on
    }

    /// Checks if a match is being played.
    pub fn in_match(&self) -> bool {
        self.game
            .as_ref()
            .is_some_and(|g| g.phase() != MatchPhase::Menu)
    }
}
