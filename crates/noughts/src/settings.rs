//! Application settings loaded from TOML.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use noughts_core::{Difficulty, MatchMode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "NOUGHTS_CONFIG";

/// Settings file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "noughts.toml";

/// User settings. Every field has a default, so a partial file is fine.
///
/// ```toml
/// high_score_path = "high_scores.json"
/// round_delay_ms = 1500
/// music = true
/// default_mode = "Best of 10"
/// default_difficulty = "Hard"
/// log_file = "noughts.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[serde(default)]
#[setters(prefix = "with_")]
pub struct Settings {
    /// JSON file holding the high-score table.
    high_score_path: PathBuf,
    /// Pause between a finished round and the next one.
    round_delay_ms: u64,
    /// Initial music flag.
    music: bool,
    /// Mode preselected in the menu.
    default_mode: MatchMode,
    /// Difficulty preselected in the menu.
    default_difficulty: Difficulty,
    /// Log file used while the terminal UI is running.
    log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_score_path: PathBuf::from("high_scores.json"),
            round_delay_ms: 1500,
            music: true,
            default_mode: MatchMode::BestOf5,
            default_difficulty: Difficulty::Easy,
            log_file: PathBuf::from("noughts.log"),
        }
    }
}

impl Settings {
    /// Round-advance delay as a [`Duration`].
    pub fn round_delay(&self) -> Duration {
        Duration::from_millis(self.round_delay_ms)
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!(
                "Failed to read settings file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(
            high_scores = %settings.high_score_path.display(),
            round_delay_ms = settings.round_delay_ms,
            "Settings loaded"
        );
        Ok(settings)
    }

    /// Finds and loads the settings file.
    ///
    /// Looks at `explicit`, then the `NOUGHTS_CONFIG` environment variable,
    /// then `./noughts.toml`. With none of them present the defaults apply.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve_with(
            explicit,
            std::env::var(CONFIG_ENV).ok(),
            Path::new(DEFAULT_CONFIG_FILE),
        )
    }

    /// [`Settings::resolve`] with the environment value and local file given.
    ///
    /// A named file (flag or environment) must exist; the local file is
    /// optional.
    #[instrument(skip(local))]
    pub fn resolve_with(
        explicit: Option<&Path>,
        env_value: Option<String>,
        local: &Path,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        if let Some(path) = env_value.filter(|v| !v.trim().is_empty()) {
            debug!(env = CONFIG_ENV, "Using settings file from environment");
            return Self::from_file(path.trim());
        }
        if local.is_file() {
            return Self::from_file(local);
        }
        debug!("No settings file found, using defaults");
        Ok(Self::default())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
