//! Noughts - terminal tic-tac-toe.

#![warn(missing_docs)]

mod cli;

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use noughts::{JsonHighScoreStore, LobbyController, LobbyState, Settings, score_lines};
use noughts_core::{Difficulty, HighScoreStore, MatchMode};
use ratatui::{Terminal, backend::CrosstermBackend};
use strum::IntoEnumIterator;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut settings =
        Settings::resolve(cli.config.as_deref()).context("Failed to load settings")?;
    if let Some(path) = cli.high_scores {
        settings = settings.with_high_score_path(path);
    }

    match cli.command.unwrap_or_else(Command::default_play) {
        Command::Play {
            name,
            mode,
            difficulty,
            seed,
        } => run_play(settings, name, mode, difficulty, seed).await,
        Command::Scores { mode } => run_scores(settings, mode),
    }
}

/// Run the terminal UI
#[instrument(skip(settings))]
async fn run_play(
    settings: Settings,
    name: Option<String>,
    mode: Option<MatchMode>,
    difficulty: Option<Difficulty>,
    seed: Option<u64>,
) -> Result<()> {
    // Setup logging to file to avoid interfering with TUI
    init_file_tracing(settings.log_file())?;

    info!("Starting Noughts TUI");

    let store = JsonHighScoreStore::new(settings.high_score_path().clone());
    let mode = mode.unwrap_or(*settings.default_mode());
    let difficulty = difficulty.unwrap_or(*settings.default_difficulty());
    let state = LobbyState::new(settings, store, seed);
    let mut lobby = LobbyController::new(state, name.unwrap_or_default(), mode, difficulty);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = lobby.run(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Lobby error");
    }
    res
}

/// Print the high-score tables to stdout
#[instrument(skip(settings))]
fn run_scores(settings: Settings, mode: Option<MatchMode>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let store = JsonHighScoreStore::new(settings.high_score_path().clone());
    let table = store.load_all();

    let modes: Vec<MatchMode> = match mode {
        Some(mode) => vec![mode],
        None => MatchMode::iter().collect(),
    };
    for mode in modes {
        println!("{}", mode);
        for line in score_lines(&table, mode) {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn init_file_tracing(log_file: &Path) -> Result<()> {
    let file = std::fs::File::create(log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,noughts=debug,noughts_core=debug")),
        )
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}
