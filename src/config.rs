// src/config.rs
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::ConfigError;

// --- Constants ---
pub const DEFAULT_SECONDS_PER_PLAYER: f64 = 15.0 * 60.0; // 15 minutes

/// Per-game settings. Every field has a default, so a JSON file only needs
/// the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Initial clock budget for each side.
    pub seconds_per_player: f64,
    /// When set, a castle is rejected if the king starts on, crosses, or
    /// lands on a square the opponent attacks. When cleared, only rights,
    /// rook presence and empty squares between are checked.
    pub castling_requires_safe_path: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            seconds_per_player: DEFAULT_SECONDS_PER_PLAYER,
            castling_requires_safe_path: true,
        }
    }
}

impl GameConfig {
    pub fn with_seconds_per_player(mut self, seconds: f64) -> Self {
        self.seconds_per_player = seconds;
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.time_budget().map(|_| ())
    }

    /// The per-side budget as a `Duration`.
    pub fn time_budget(&self) -> Result<Duration, ConfigError> {
        if !(self.seconds_per_player.is_finite() && self.seconds_per_player > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "seconds_per_player must be a positive number, got {}",
                self.seconds_per_player
            )));
        }
        Duration::try_from_secs_f64(self.seconds_per_player)
            .map_err(|e| ConfigError::Invalid(format!("seconds_per_player: {}", e)))
    }
}
