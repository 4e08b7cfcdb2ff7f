//! Match configuration and cumulative score.

use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::rules::Outcome;
use crate::scores::HighScoreRecord;
use crate::strategy::Difficulty;
use crate::types::Mark;

/// How many rounds a match lasts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum MatchMode {
    /// Five rounds.
    #[default]
    #[serde(rename = "Best of 5")]
    BestOf5,
    /// Ten rounds.
    #[serde(rename = "Best of 10")]
    BestOf10,
    /// Twenty rounds.
    #[serde(rename = "Best of 20")]
    BestOf20,
}

impl MatchMode {
    /// Number of rounds in the match.
    pub fn rounds(self) -> u32 {
        match self {
            MatchMode::BestOf5 => 5,
            MatchMode::BestOf10 => 10,
            MatchMode::BestOf20 => 20,
        }
    }

    /// Display label, also the high-score table key.
    pub fn label(self) -> &'static str {
        match self {
            MatchMode::BestOf5 => "Best of 5",
            MatchMode::BestOf10 => "Best of 10",
            MatchMode::BestOf20 => "Best of 20",
        }
    }

    /// Mode with the given round count.
    pub fn from_rounds(rounds: u32) -> Option<Self> {
        match rounds {
            5 => Some(MatchMode::BestOf5),
            10 => Some(MatchMode::BestOf10),
            20 => Some(MatchMode::BestOf20),
            _ => None,
        }
    }

    /// Mode with the given label.
    pub fn from_label(label: &str) -> Option<Self> {
        <Self as strum::IntoEnumIterator>::iter().find(|m| m.label() == label)
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Chosen mode and difficulty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Getters, new)]
pub struct MatchConfig {
    mode: MatchMode,
    difficulty: Difficulty,
}

/// Cumulative state of one match.
///
/// `rounds_played` never exceeds the mode's round count. A decided round is
/// credited to `player_score`, `opponent_score` or `draws` as soon as it ends,
/// but only counted in `rounds_played` once it is advanced, so the three
/// tallies sum to `rounds_played` after each round is counted and to one more
/// while a finished round waits to advance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchState {
    config: MatchConfig,
    player_name: String,
    player_score: u32,
    opponent_score: u32,
    draws: u32,
    rounds_played: u32,
}

impl MatchState {
    /// Starts a match with zeroed counters.
    #[instrument]
    pub fn new(config: MatchConfig, player_name: String) -> Self {
        Self {
            config,
            player_name,
            player_score: 0,
            opponent_score: 0,
            draws: 0,
            rounds_played: 0,
        }
    }

    /// Round target for this match.
    pub fn target(&self) -> u32 {
        self.config.mode().rounds()
    }

    /// One-based number of the round being played.
    pub fn round_number(&self) -> u32 {
        (self.rounds_played + 1).min(self.target())
    }

    /// Checks if every round has been played.
    pub fn is_complete(&self) -> bool {
        self.rounds_played >= self.target()
    }

    /// Credits the winner of a finished round.
    pub(crate) fn record_outcome(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Win(Mark::Player, _) => self.player_score += 1,
            Outcome::Win(Mark::Opponent, _) => self.opponent_score += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => return,
        }
        debug!(
            player = self.player_score,
            opponent = self.opponent_score,
            draws = self.draws,
            "Score updated"
        );
    }

    /// Counts a finished round.
    pub(crate) fn complete_round(&mut self) {
        if !self.is_complete() {
            self.rounds_played += 1;
        }
    }

    /// Zeroes scores and rounds played.
    pub(crate) fn reset_counters(&mut self) {
        self.player_score = 0;
        self.opponent_score = 0;
        self.draws = 0;
        self.rounds_played = 0;
    }

    /// High-score record for the current totals.
    pub fn to_record(&self) -> HighScoreRecord {
        HighScoreRecord::new(
            self.player_name.clone(),
            self.player_score,
            self.config.difficulty().to_string(),
        )
    }
}
