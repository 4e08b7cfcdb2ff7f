//! Main menu: player name, match options and navigation.

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use noughts_core::{Difficulty, MatchConfig, MatchMode};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use strum::IntoEnumIterator;
use tracing::{debug, info, instrument};

use super::cycle;
use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::state::LobbyState;

/// Longest accepted player name, in characters.
const MAX_NAME_LEN: usize = 20;

/// Name used when the entry is left blank.
const DEFAULT_NAME: &str = "Player";

/// Rows of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIter)]
enum MenuOption {
    Name,
    Mode,
    Difficulty,
    Music,
    Start,
    HighScores,
    Quit,
}

impl MenuOption {
    fn all() -> Vec<MenuOption> {
        Self::iter().collect()
    }
}

/// State for the main menu screen.
#[derive(Debug, Getters)]
pub struct MenuScreen {
    name_input: String,
    editing_name: bool,
    mode: MatchMode,
    difficulty: Difficulty,
    list_state: ListState,
    notice: Option<String>,
}

impl MenuScreen {
    /// Creates the menu with the given preselections.
    #[instrument]
    pub fn new(
        name: String,
        mode: MatchMode,
        difficulty: Difficulty,
        notice: Option<String>,
    ) -> Self {
        debug!("Initializing MenuScreen");
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            name_input: name,
            editing_name: false,
            mode,
            difficulty,
            list_state,
            notice,
        }
    }

    /// Name that a match started now would use.
    pub fn player_name(&self) -> String {
        match self.name_input.trim() {
            "" => DEFAULT_NAME.to_string(),
            name => name.to_string(),
        }
    }

    fn select_previous(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) if i > 0 => i - 1,
            _ => count - 1,
        };
        self.list_state.select(Some(i));
    }

    fn select_next(&mut self) {
        let count = MenuOption::all().len();
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % count,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn selected_option(&self) -> MenuOption {
        let options = MenuOption::all();
        let idx = self.list_state.selected().unwrap_or(0);
        options[idx.min(options.len() - 1)]
    }

    /// Cycles mode or difficulty when that row is selected.
    fn cycle_selected(&mut self, forward: bool) {
        match self.selected_option() {
            MenuOption::Mode => self.mode = cycle(self.mode, forward),
            MenuOption::Difficulty => self.difficulty = cycle(self.difficulty, forward),
            _ => {}
        }
    }

    fn option_label(&self, option: MenuOption, music_on: bool) -> String {
        match option {
            MenuOption::Name => {
                let cursor = if self.editing_name { "_" } else { "" };
                format!("Name: {}{}", self.name_input, cursor)
            }
            MenuOption::Mode => format!("Mode: < {} >", self.mode),
            MenuOption::Difficulty => format!("Difficulty: < {} >", self.difficulty),
            MenuOption::Music => format!("Music: {}", if music_on { "On" } else { "Off" }),
            MenuOption::Start => "Start Game".to_string(),
            MenuOption::HighScores => "High Scores".to_string(),
            MenuOption::Quit => "Quit".to_string(),
        }
    }

    fn handle_name_key(&mut self, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                if self.name_input.chars().count() < MAX_NAME_LEN {
                    self.name_input.push(c);
                }
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.editing_name = false;
                debug!(name = %self.name_input, "Name entry finished");
            }
            _ => {}
        }
        ScreenTransition::Stay
    }
}

impl Screen for MenuScreen {
    #[instrument(skip(self, frame, lobby))]
    fn render(&self, frame: &mut Frame, lobby: &LobbyState) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(9),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let title = Paragraph::new("Noughts: Tic-Tac-Toe")
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let items: Vec<ListItem> = MenuOption::all()
            .into_iter()
            .map(|opt| ListItem::new(self.option_label(opt, *lobby.music_on())))
            .collect();

        let menu = List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Menu"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut list_state = self.list_state;
        frame.render_stateful_widget(menu, chunks[1], &mut list_state);

        let notice = Paragraph::new(self.notice.as_deref().unwrap_or(""))
            .style(Style::default().fg(Color::Green))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(notice, chunks[2]);

        let help_text = if self.editing_name {
            "Type name | Enter: Done"
        } else {
            "↑↓: Navigate | ←→: Change | Enter: Select | q: Quit"
        };
        let help = Paragraph::new(help_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _lobby))]
    fn handle_key(&mut self, key: KeyEvent, _lobby: &LobbyState) -> ScreenTransition {
        if self.editing_name {
            return self.handle_name_key(key);
        }
        match key.code {
            KeyCode::Up => {
                self.select_previous();
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.select_next();
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.cycle_selected(false);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.cycle_selected(true);
                ScreenTransition::Stay
            }
            KeyCode::Enter => {
                let option = self.selected_option();
                info!(option = ?option, "Menu option selected");
                match option {
                    MenuOption::Name => {
                        self.editing_name = true;
                        self.notice = None;
                        ScreenTransition::Stay
                    }
                    MenuOption::Mode | MenuOption::Difficulty => {
                        self.cycle_selected(true);
                        ScreenTransition::Stay
                    }
                    MenuOption::Music => ScreenTransition::ToggleMusic,
                    MenuOption::Start => ScreenTransition::StartMatch {
                        player_name: self.player_name(),
                        config: MatchConfig::new(self.mode, self.difficulty),
                    },
                    MenuOption::HighScores => ScreenTransition::GoToHighScores,
                    MenuOption::Quit => ScreenTransition::Quit,
                }
            }
            KeyCode::Char('m') | KeyCode::Char('M') => ScreenTransition::ToggleMusic,
            KeyCode::Char('q') | KeyCode::Char('Q') => ScreenTransition::Quit,
            _ => ScreenTransition::Stay,
        }
    }
}
