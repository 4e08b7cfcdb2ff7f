//! Command-line interface for noughts.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use noughts_core::{Difficulty, MatchMode};

/// Noughts - best-of-N tic-tac-toe against a computer opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Best-of-N tic-tac-toe against a computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Falls back to $NOUGHTS_CONFIG, then ./noughts.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// High-score file, overriding the settings
    #[arg(long, global = true)]
    pub high_scores: Option<PathBuf>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open the terminal UI
    Play {
        /// Player name preselected in the menu
        #[arg(long)]
        name: Option<String>,

        /// Rounds per match: 5, 10 or 20
        #[arg(long, value_parser = parse_mode)]
        mode: Option<MatchMode>,

        /// Opponent difficulty: easy, medium or hard
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// Seed for the opponent's random choices
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the high-score tables
    Scores {
        /// Only this mode (5, 10 or 20)
        #[arg(long, value_parser = parse_mode)]
        mode: Option<MatchMode>,
    },
}

impl Command {
    /// `play` with every option left to the settings.
    pub fn default_play() -> Self {
        Command::Play {
            name: None,
            mode: None,
            difficulty: None,
            seed: None,
        }
    }
}

/// Accepts a round count (`5`) or a mode label (`Best of 5`).
fn parse_mode(s: &str) -> Result<MatchMode, String> {
    let s = s.trim();
    s.parse::<u32>()
        .ok()
        .and_then(MatchMode::from_rounds)
        .or_else(|| MatchMode::from_label(s))
        .ok_or_else(|| format!("unknown mode '{}', expected 5, 10 or 20", s))
}
