//! Game configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::game::Rules;

/// Faults raised while loading a configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config {path}: {message}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
    /// The file is not a valid configuration.
    #[error("invalid config: {0}")]
    Json(String),
}

/// Settings for a single game.
///
/// Every field has a default, so a config file only needs to name what it
/// changes:
///
/// ```json
/// { "board_width": 30, "rules": { "spawn_delay": 5 } }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width.
    pub board_width: u16,
    /// Board height.
    pub board_height: u16,
    /// Fraction of the board a single player may fill, in `(0, 1]`.
    pub unit_limit_pct: f64,
    /// Turns before the game is called.
    pub max_turns: u32,
    /// Combat, spawning and execution rules.
    pub rules: Rules,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 20,
            board_height: 20,
            unit_limit_pct: 0.05,
            max_turns: 10_000,
            rules: Rules::default(),
        }
    }
}

impl GameConfig {
    /// Parse a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Json`] if the text is not a valid configuration.
    pub fn from_json(src: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(src).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Read a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] or [`ConfigError::Json`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&src)
    }
}
