//! Lobby controller - the state machine driving the multi-screen TUI.

use crossterm::event::{self, Event, KeyEventKind};
use noughts_core::{
    AdvanceTicket, Difficulty, HighScoreStore, InvalidMove, MatchError, MatchMode, MatchSummary,
    RoundAdvance,
};
use ratatui::{Terminal, backend::Backend};
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{debug, info, instrument, warn};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::screens::{HighScoresScreen, InGameScreen, MenuScreen};
use crate::lobby::state::LobbyState;
use crate::timer::RoundTimer;

/// Active screen in the lobby state machine.
#[derive(Debug)]
enum ActiveScreen {
    Menu(MenuScreen),
    InGame(InGameScreen),
    HighScores(HighScoresScreen),
}

/// Menu selections carried between visits to the menu.
#[derive(Debug, Clone)]
struct MenuChoice {
    name: String,
    mode: MatchMode,
    difficulty: Difficulty,
}

/// Controller that drives the lobby state machine.
///
/// Call [`LobbyController::run`] to start the event loop. Must be created
/// inside a tokio runtime, since round advances are scheduled on it.
#[derive(Debug)]
pub struct LobbyController {
    state: LobbyState,
    timer: RoundTimer,
    advances: mpsc::UnboundedReceiver<AdvanceTicket>,
    choice: MenuChoice,
}

impl LobbyController {
    /// Creates a new lobby controller.
    ///
    /// `name`, `mode` and `difficulty` preselect the menu.
    #[instrument(skip(state))]
    pub fn new(
        state: LobbyState,
        name: String,
        mode: MatchMode,
        difficulty: Difficulty,
    ) -> Self {
        info!("Creating LobbyController");
        let (timer, advances) = RoundTimer::new(state.settings().round_delay());
        Self {
            state,
            timer,
            advances,
            choice: MenuChoice {
                name,
                mode,
                difficulty,
            },
        }
    }

    /// Shared lobby state.
    pub fn state(&self) -> &LobbyState {
        &self.state
    }

    /// Runs the lobby event loop until the user quits.
    ///
    /// The caller owns terminal setup and teardown.
    #[instrument(skip(self, terminal))]
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()>
    where
        <B as Backend>::Error: Send + Sync + 'static,
    {
        info!("Starting lobby event loop");

        let mut screen = self.menu_screen(None);

        loop {
            // Deliver any round advance whose delay has passed.
            while let Ok(ticket) = self.advances.try_recv() {
                screen = self.redeem(ticket, screen);
            }

            terminal.draw(|f| match &screen {
                ActiveScreen::Menu(s) => s.render(f, &self.state),
                ActiveScreen::InGame(s) => s.render(f, &self.state),
                ActiveScreen::HighScores(s) => s.render(f, &self.state),
            })?;

            // Poll for input with short timeout to keep the loop responsive.
            if event::poll(Duration::from_millis(100))?
                && let Event::Key(key) = event::read()?
            {
                // Skip key release events (crossterm fires both press and release).
                if key.kind == KeyEventKind::Release {
                    continue;
                }

                let transition = match &mut screen {
                    ActiveScreen::Menu(s) => s.handle_key(key, &self.state),
                    ActiveScreen::InGame(s) => s.handle_key(key, &self.state),
                    ActiveScreen::HighScores(s) => s.handle_key(key, &self.state),
                };

                screen = match self.apply_transition(transition, screen) {
                    Some(next) => next,
                    None => {
                        info!("Lobby quitting");
                        return Ok(());
                    }
                };
            }

            sleep(Duration::from_millis(10)).await;
        }
    }

    /// Applies a screen transition, returning the next screen or `None` to quit.
    #[instrument(skip(self, current))]
    fn apply_transition(
        &mut self,
        transition: ScreenTransition,
        current: ActiveScreen,
    ) -> Option<ActiveScreen> {
        debug!(transition = ?transition, "Applying screen transition");
        match transition {
            ScreenTransition::Stay => Some(current),

            ScreenTransition::GoToMenu => {
                info!("Navigating to Menu");
                Some(self.menu_screen(None))
            }

            ScreenTransition::GoToHighScores => {
                info!("Navigating to HighScores");
                let table = self.state.store().load_all();
                Some(ActiveScreen::HighScores(HighScoresScreen::new(
                    table,
                    self.choice.mode,
                )))
            }

            ScreenTransition::StartMatch {
                player_name,
                config,
            } => {
                self.choice = MenuChoice {
                    name: player_name.clone(),
                    mode: *config.mode(),
                    difficulty: *config.difficulty(),
                };
                match self.state.start_match(config, player_name) {
                    Ok(()) => {
                        info!("Navigating to InGame");
                        Some(ActiveScreen::InGame(InGameScreen::new()))
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not start match");
                        Some(self.menu_screen(Some(e.to_string())))
                    }
                }
            }

            ScreenTransition::PlaceMark(index) => match current {
                ActiveScreen::InGame(mut screen) => {
                    match self.state.place(index) {
                        Ok(report) => {
                            screen.clear_notice();
                            if let Some(ticket) = *report.ticket() {
                                self.timer.schedule(ticket);
                            }
                        }
                        Err(e) => {
                            debug!(error = %e, "Move rejected");
                            screen.set_notice(notice_for(&e));
                        }
                    }
                    Some(ActiveScreen::InGame(screen))
                }
                other => Some(other),
            },

            ScreenTransition::ResetBoard => match current {
                ActiveScreen::InGame(mut screen) => {
                    match self.state.reset_board() {
                        Ok(()) => screen.clear_notice(),
                        Err(e) => screen.set_notice(notice_for(&e)),
                    }
                    Some(ActiveScreen::InGame(screen))
                }
                other => Some(other),
            },

            ScreenTransition::ToggleMusic => {
                self.state.toggle_music();
                Some(current)
            }

            ScreenTransition::AbandonToMenu => {
                self.abandon();
                Some(self.menu_screen(None))
            }

            ScreenTransition::Quit => {
                self.abandon();
                None
            }
        }
    }

    /// Cancels any pending advance and drops the running match.
    fn abandon(&mut self) {
        if self.timer.cancel() {
            debug!("Pending round advance cancelled");
        }
        while self.advances.try_recv().is_ok() {}
        self.state.abandon();
    }

    /// Redeems a ticket delivered by the round timer.
    #[instrument(skip(self, current))]
    fn redeem(&mut self, ticket: AdvanceTicket, current: ActiveScreen) -> ActiveScreen {
        match self.state.advance(ticket) {
            Ok(RoundAdvance::NextRound { round }) => {
                debug!(round, "Next round ready");
                match current {
                    ActiveScreen::InGame(mut screen) => {
                        screen.clear_notice();
                        ActiveScreen::InGame(screen)
                    }
                    other => other,
                }
            }
            Ok(RoundAdvance::MatchComplete(summary)) => {
                info!("Match complete, returning to Menu");
                self.menu_screen(Some(summary_notice(&summary)))
            }
            Err(e) => {
                debug!(error = %e, "Dropping advance ticket");
                current
            }
        }
    }

    fn menu_screen(&self, notice: Option<String>) -> ActiveScreen {
        ActiveScreen::Menu(MenuScreen::new(
            self.choice.name.clone(),
            self.choice.mode,
            self.choice.difficulty,
            notice,
        ))
    }
}

/// Short message for a rejected action.
fn notice_for(err: &MatchError) -> String {
    match err {
        MatchError::InvalidMove(InvalidMove::Occupied(index)) => {
            format!("Cell {} is already taken", index + 1)
        }
        MatchError::InvalidMove(InvalidMove::RoundOver) | MatchError::NotInRound => {
            "Round over, next round starting...".to_string()
        }
        other => other.to_string(),
    }
}

/// Menu message shown after the last round.
fn summary_notice(summary: &MatchSummary) -> String {
    let state = summary.state();
    let saved = if *summary.saved() {
        "Score saved."
    } else {
        "Score could not be saved."
    };
    format!(
        "Match over! {}: {} | AI: {}. {}",
        state.player_name(),
        state.player_score(),
        state.opponent_score(),
        saved
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{JsonHighScoreStore, Settings};
    use noughts_core::MatchConfig;

    fn controller(dir: &tempfile::TempDir) -> LobbyController {
        let settings = Settings::default()
            .with_high_score_path(dir.path().join("scores.json"))
            .with_round_delay_ms(50);
        let store = JsonHighScoreStore::new(settings.high_score_path().clone());
        let state = LobbyState::new(settings, store, Some(5));
        LobbyController::new(state, "Ada".to_string(), MatchMode::BestOf5, Difficulty::Hard)
    }

    fn start(lobby: &mut LobbyController) -> ActiveScreen {
        let transition = ScreenTransition::StartMatch {
            player_name: "Ada".to_string(),
            config: MatchConfig::new(MatchMode::BestOf5, Difficulty::Hard),
        };
        let menu = lobby.menu_screen(None);
        lobby
            .apply_transition(transition, menu)
            .expect("lobby keeps running")
    }

    /// Plays the first empty cell until the round ends.
    fn finish_round(lobby: &mut LobbyController, mut screen: ActiveScreen) -> ActiveScreen {
        while !lobby.timer.is_pending() {
            let index = lobby
                .state()
                .game()
                .as_ref()
                .map(|g| g.board().empty_cells()[0])
                .expect("match running");
            screen = lobby
                .apply_transition(ScreenTransition::PlaceMark(index), screen)
                .expect("lobby keeps running");
        }
        screen
    }

    #[tokio::test(start_paused = true)]
    async fn test_round_end_schedules_advance() {
        let dir = tempfile::tempdir().unwrap();
        let mut lobby = controller(&dir);
        let screen = start(&mut lobby);
        assert!(matches!(screen, ActiveScreen::InGame(_)));

        let screen = finish_round(&mut lobby, screen);
        let ticket = lobby.advances.recv().await.expect("timer fires");
        let screen = lobby.redeem(ticket, screen);

        assert!(matches!(screen, ActiveScreen::InGame(_)));
        let game = lobby.state().game().as_ref().unwrap();
        assert_eq!(*game.state().rounds_played(), 1);
        assert_eq!(game.board().move_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandon_cancels_pending_advance() {
        let dir = tempfile::tempdir().unwrap();
        let mut lobby = controller(&dir);
        let screen = start(&mut lobby);
        let screen = finish_round(&mut lobby, screen);

        let screen = lobby
            .apply_transition(ScreenTransition::AbandonToMenu, screen)
            .unwrap();
        assert!(matches!(screen, ActiveScreen::Menu(_)));
        assert!(!lobby.timer.is_pending());
        assert!(!lobby.state().in_match());

        sleep(Duration::from_secs(5)).await;
        assert!(lobby.advances.try_recv().is_err());
        let game = lobby.state().game().as_ref().unwrap();
        assert_eq!(*game.state().rounds_played(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_match_saves_and_returns_to_menu() {
        let dir = tempfile::tempdir().unwrap();
        let mut lobby = controller(&dir);
        let mut screen = start(&mut lobby);

        for _ in 0..5 {
            screen = finish_round(&mut lobby, screen);
            let ticket = lobby.advances.recv().await.expect("timer fires");
            screen = lobby.redeem(ticket, screen);
        }

        match &screen {
            ActiveScreen::Menu(menu) => {
                let notice = menu.notice().as_deref().unwrap_or_default();
                assert!(notice.starts_with("Match over! Ada: 0 | AI: "), "{notice}");
                assert!(notice.ends_with("Score saved."), "{notice}");
            }
            other => panic!("expected menu, got {other:?}"),
        }

        let table = lobby.state().store().load_all();
        let records = table.records(MatchMode::BestOf5);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Ada");
        assert_eq!(*records[0].score(), 0);
        assert_eq!(records[0].difficulty(), "Hard");
    }

    #[test]
    fn test_occupied_notice_is_one_based() {
        let err = MatchError::InvalidMove(InvalidMove::Occupied(4));
        assert_eq!(notice_for(&err), "Cell 5 is already taken");
    }
}
