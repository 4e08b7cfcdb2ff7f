//! High-score tables, one tab per match mode.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use noughts_core::{HighScoreTable, MatchMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::cycle;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::state::LobbyState;
use crate::store::score_lines;

/// State for the high-score screen.
#[derive(Debug, Getters)]
pub struct HighScoresScreen {
    table: HighScoreTable,
    mode: MatchMode,
}

impl HighScoresScreen {
    /// Creates the screen showing `mode` first.
    #[instrument(skip(table))]
    pub fn new(table: HighScoreTable, mode: MatchMode) -> Self {
        debug!(
            total = MatchMode::iter().map(|m| table.records(m).len()).sum::<usize>(),
            "Initializing HighScoresScreen"
        );
        Self { table, mode }
    }

    /// Lines for the visible tab.
    pub fn lines(&self) -> Vec<String> {
        score_lines(&self.table, self.mode)
    }

    fn switch_tab(&mut self, forward: bool) {
        self.mode = cycle(self.mode, forward);
    }
}

impl Screen for HighScoresScreen {
    #[instrument(skip(self, frame, _lobby))]
    fn render(&self, frame: &mut Frame, _lobby: &LobbyState) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        let labels: Vec<&str> = MatchMode::iter().map(MatchMode::label).collect();
        let selected = MatchMode::iter().position(|m| m == self.mode).unwrap_or(0);
        let tabs = Tabs::new(labels)
            .select(selected)
            .block(Block::default().borders(Borders::ALL).title("High Scores"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let items: Vec<ListItem> = self.lines().into_iter().map(ListItem::new).collect();
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.mode.label()),
        );
        frame.render_widget(list, chunks[1]);

        let help = Paragraph::new("←→ / Tab: Switch mode | Esc / b: Back | q: Quit")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[2]);
    }

    #[instrument(skip(self, key, _lobby))]
    fn handle_key(&mut self, key: KeyEvent, _lobby: &LobbyState) -> ScreenTransition {
        match key.code {
            KeyCode::Left | KeyCode::BackTab => {
                self.switch_tab(false);
                ScreenTransition::Stay
            }
            KeyCode::Right | KeyCode::Tab => {
                self.switch_tab(true);
                ScreenTransition::Stay
            }
            KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
                info!("Returning to menu from high scores");
                ScreenTransition::GoToMenu
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
