//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::session::RoundTiming;

/// Pacing and naming options for a play session.
///
/// Every field has a default, so an empty file (or no file) is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Display name of the computer opponent.
    #[serde(default = "default_computer_name")]
    computer_name: String,

    /// Pause before the computer plays, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// How long the winning line stays highlighted, in milliseconds.
    #[serde(default = "default_win_highlight_ms")]
    win_highlight_ms: u64,

    /// Pause after a draw before the result screen, in milliseconds.
    #[serde(default = "default_draw_delay_ms")]
    draw_delay_ms: u64,

    /// Wait before the coin starts flipping, in milliseconds.
    #[serde(default = "default_toss_start_ms")]
    toss_start_ms: u64,

    /// How long the coin flips, in milliseconds.
    #[serde(default = "default_toss_flip_ms")]
    toss_flip_ms: u64,

    /// Interval between 2% loading steps, in milliseconds.
    #[serde(default = "default_loading_step_ms")]
    loading_step_ms: u64,

    /// Fixed RNG seed; random when absent.
    #[serde(default)]
    seed: Option<u64>,
}

#[instrument]
fn default_computer_name() -> String {
    "Computer".to_string()
}

#[instrument]
fn default_computer_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_win_highlight_ms() -> u64 {
    2000
}

#[instrument]
fn default_draw_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_toss_start_ms() -> u64 {
    1000
}

#[instrument]
fn default_toss_flip_ms() -> u64 {
    2000
}

#[instrument]
fn default_loading_step_ms() -> u64 {
    50
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            computer_name: default_computer_name(),
            computer_delay_ms: default_computer_delay_ms(),
            win_highlight_ms: default_win_highlight_ms(),
            draw_delay_ms: default_draw_delay_ms(),
            toss_start_ms: default_toss_start_ms(),
            toss_flip_ms: default_toss_flip_ms(),
            loading_step_ms: default_loading_step_ms(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_toml(&content)?;
        info!(computer_name = %config.computer_name, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from a TOML string and validates it.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| {
            ConfigError::new(format!("Failed to parse config: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists, otherwise returns defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Serializes the configuration as TOML.
    #[instrument(skip(self))]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|e| {
            ConfigError::new(format!("Failed to serialize config: {}", e))
        })
    }

    /// Overrides the RNG seed.
    #[instrument(skip(self))]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }

    /// Round pacing derived from this configuration.
    pub fn round_timing(&self) -> RoundTiming {
        RoundTiming::new(
            Duration::from_millis(self.computer_delay_ms),
            Duration::from_millis(self.win_highlight_ms),
            Duration::from_millis(self.draw_delay_ms),
        )
    }

    #[instrument(skip(self))]
    fn validate(&self) -> Result<(), ConfigError> {
        if self.computer_name.trim().is_empty() {
            return Err(ConfigError::new(
                "computer_name cannot be blank".to_string(),
            ));
        }
        if self.loading_step_ms == 0 {
            return Err(ConfigError::new(
                "loading_step_ms must be positive".to_string(),
            ));
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = GameConfig::from_toml("").unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.computer_delay_ms(), &500);
        assert_eq!(config.win_highlight_ms(), &2000);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = GameConfig::from_toml("computer_name = \"HAL\"\nseed = 9\n").unwrap();
        assert_eq!(config.computer_name(), "HAL");
        assert_eq!(config.seed(), &Some(9));
        assert_eq!(config.draw_delay_ms(), &500);
    }

    #[test]
    fn test_blank_computer_name_rejected() {
        let err = GameConfig::from_toml("computer_name = \"  \"").unwrap_err();
        assert!(err.message.contains("computer_name"));
    }

    #[test]
    fn test_cli_seed_overrides_file_seed() {
        let config = GameConfig::default().with_seed(Some(3));
        assert_eq!(config.seed(), &Some(3));
        let config = config.with_seed(None);
        assert_eq!(config.seed(), &Some(3));
    }
}
