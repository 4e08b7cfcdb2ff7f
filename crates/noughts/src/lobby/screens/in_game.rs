//! In-game screen: the board, round counter and score line.
//!
//! Moves are not applied here. The screen tracks the cursor and turns key
//! presses into [`ScreenTransition::PlaceMark`] and friends; the
//! [`LobbyController`](crate::LobbyController) applies them to the match and
//! reports rejected moves back through [`InGameScreen::set_notice`].

use crossterm::event::{KeyCode, KeyEvent};
use derive_getters::Getters;
use noughts_core::{Board, Cell, Mark, MatchController, MatchPhase, Outcome, Position};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tracing::{debug, instrument};

use crate::lobby::screen::{Screen, ScreenTransition};
use crate::lobby::state::LobbyState;

/// State for the in-game screen.
#[derive(Debug, Getters)]
pub struct InGameScreen {
    cursor: Position,
    notice: Option<String>,
}

impl Default for InGameScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl InGameScreen {
    /// Creates the screen with the cursor on the center cell.
    #[instrument]
    pub fn new() -> Self {
        debug!("Initializing InGameScreen");
        Self {
            cursor: Position::Center,
            notice: None,
        }
    }

    /// Shows a one-line message under the board until the next move.
    pub fn set_notice(&mut self, notice: impl Into<String>) {
        self.notice = Some(notice.into());
    }

    /// Clears the message line.
    pub fn clear_notice(&mut self) {
        self.notice = None;
    }
}

/// Round label, `Round N of R`.
pub fn round_line(game: &MatchController) -> String {
    format!(
        "Round {} of {}",
        game.state().round_number(),
        game.state().target()
    )
}

/// Score label, `Player: a | AI: b`.
pub fn score_line(game: &MatchController) -> String {
    format!(
        "Player: {} | AI: {}",
        game.state().player_score(),
        game.state().opponent_score()
    )
}

/// Status text for the current phase.
pub fn status_line(game: &MatchController) -> &'static str {
    match game.phase() {
        MatchPhase::RoundOver { outcome, .. } => match outcome {
            Outcome::Win(Mark::Player, _) => "You win this round!",
            Outcome::Win(Mark::Opponent, _) => "AI wins this round!",
            _ => "It's a draw!",
        },
        MatchPhase::InRound => "Your move",
        MatchPhase::Menu => "",
    }
}

fn render_board(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    outcome: Outcome,
    cursor: Option<Position>,
) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    for (row, start) in [(0, 0), (2, 3), (4, 6)] {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Length(1),
                Constraint::Percentage(33),
                Constraint::Length(1),
                Constraint::Percentage(34),
            ])
            .split(rows[row]);
        for (col, offset) in [(0, 0), (2, 1), (4, 2)] {
            let index = start + offset;
            render_square(frame, cols[col], board, index, outcome, cursor);
        }
        render_vertical_sep(frame, cols[1]);
        render_vertical_sep(frame, cols[3]);
    }
    render_separator(frame, rows[1]);
    render_separator(frame, rows[3]);
}

fn render_square(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    index: usize,
    outcome: Outcome,
    cursor: Option<Position>,
) {
    let (text, mut style) = match board.cell(index).unwrap_or_default() {
        Cell::Empty => (
            format!("{}", index + 1),
            Style::default().fg(Color::DarkGray),
        ),
        Cell::Occupied(Mark::Player) => (
            "X".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
        Cell::Occupied(Mark::Opponent) => (
            "O".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    };
    if outcome.line().is_some_and(|line| line.contains(index)) {
        style = style.bg(Color::LightGreen);
    }
    if cursor.is_some_and(|c| c.index() == index) {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let paragraph = Paragraph::new(text).style(style).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn render_vertical_sep(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((area.width.saturating_sub(width)) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((area.height.saturating_sub(height)) / 2),
        ])
        .split(horizontal[1])[1]
}

impl Screen for InGameScreen {
    #[instrument(skip(self, frame, lobby))]
    fn render(&self, frame: &mut Frame, lobby: &LobbyState) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(13),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(area);

        let Some(game) = lobby.game() else {
            let idle = Paragraph::new("No match running. Press Esc for the menu.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(idle, area);
            return;
        };

        let music = if *lobby.music_on() { "On" } else { "Off" };
        let header = format!(
            "{}   {}   {} vs AI ({})   Music: {}",
            round_line(game),
            score_line(game),
            game.state().player_name(),
            game.state().config().difficulty(),
            music
        );
        let title = Paragraph::new(header)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        let board_block = Block::default()
            .borders(Borders::ALL)
            .title(game.state().config().mode().label());
        let inner = board_block.inner(chunks[1]);
        frame.render_widget(board_block, chunks[1]);
        let cursor = (game.phase() == MatchPhase::InRound).then_some(self.cursor);
        render_board(
            frame,
            center_rect(inner, 23, 11),
            game.board(),
            game.outcome(),
            cursor,
        );

        let status_text = self.notice.as_deref().unwrap_or(status_line(game));
        let status_color = if self.notice.is_some() {
            Color::Red
        } else {
            Color::Green
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().fg(status_color))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(
            "←↑↓→ / 1-9: Move | Enter: Place | r: Reset Board | m: Music | Esc: Quit to Menu",
        )
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(help, chunks[3]);
    }

    #[instrument(skip(self, key, _lobby))]
    fn handle_key(&mut self, key: KeyEvent, _lobby: &LobbyState) -> ScreenTransition {
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.step(-1, 0);
                ScreenTransition::Stay
            }
            KeyCode::Down => {
                self.cursor = self.cursor.step(1, 0);
                ScreenTransition::Stay
            }
            KeyCode::Left => {
                self.cursor = self.cursor.step(0, -1);
                ScreenTransition::Stay
            }
            KeyCode::Right => {
                self.cursor = self.cursor.step(0, 1);
                ScreenTransition::Stay
            }
            KeyCode::Char(c @ '1'..='9') => {
                let index = c as usize - '1' as usize;
                if let Some(pos) = Position::from_index(index) {
                    self.cursor = pos;
                }
                ScreenTransition::PlaceMark(index)
            }
            KeyCode::Enter | KeyCode::Char(' ') => ScreenTransition::PlaceMark(self.cursor.index()),
            KeyCode::Char('r') | KeyCode::Char('R') => ScreenTransition::ResetBoard,
            KeyCode::Char('m') | KeyCode::Char('M') => ScreenTransition::ToggleMusic,
            KeyCode::Esc => ScreenTransition::AbandonToMenu,
            _ => ScreenTransition::Stay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use noughts_core::{Difficulty, MatchConfig, MatchMode};
    use ratatui::{Terminal, backend::TestBackend};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn lobby_with_match() -> LobbyState {
        let mut lobby = LobbyState::new(
            crate::Settings::default(),
            crate::JsonHighScoreStore::new("unused.json"),
            Some(3),
        );
        lobby
            .start_match(
                MatchConfig::new(MatchMode::BestOf5, Difficulty::Hard),
                "Ada".to_string(),
            )
            .unwrap();
        lobby
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_cursor_wraps_and_places() {
        let lobby = lobby_with_match();
        let mut screen = InGameScreen::new();
        screen.handle_key(key(KeyCode::Up), &lobby);
        screen.handle_key(key(KeyCode::Up), &lobby);
        assert_eq!(*screen.cursor(), Position::BottomCenter);
        assert_eq!(
            screen.handle_key(key(KeyCode::Enter), &lobby),
            ScreenTransition::PlaceMark(7)
        );
    }

    #[test]
    fn test_digit_keys_are_one_based() {
        let lobby = lobby_with_match();
        let mut screen = InGameScreen::new();
        assert_eq!(
            screen.handle_key(key(KeyCode::Char('1')), &lobby),
            ScreenTransition::PlaceMark(0)
        );
        assert_eq!(*screen.cursor(), Position::TopLeft);
        assert_eq!(
            screen.handle_key(key(KeyCode::Esc), &lobby),
            ScreenTransition::AbandonToMenu
        );
    }

    #[test]
    fn test_labels_follow_match_state() {
        let mut lobby = lobby_with_match();
        let game = lobby.game().as_ref().unwrap();
        assert_eq!(round_line(game), "Round 1 of 5");
        assert_eq!(score_line(game), "Player: 0 | AI: 0");
        assert_eq!(status_line(game), "Your move");

        lobby.place(4).unwrap();
        let game = lobby.game().as_ref().unwrap();
        assert_eq!(game.board().move_count(), 2);
        assert_eq!(status_line(game), "Your move");
    }

    #[test]
    fn test_render_shows_round_and_score() {
        let lobby = lobby_with_match();
        let screen = InGameScreen::new();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| screen.render(f, &lobby)).unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Round 1 of 5"), "{text}");
        assert!(text.contains("Player: 0 | AI: 0"), "{text}");
        assert!(text.contains("Your move"), "{text}");
    }
}
