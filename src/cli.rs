//! CLI command implementations for Skirmish.

pub(crate) mod run;
pub(crate) mod tournament;
pub(crate) mod validate;

mod output;

use clap::ValueEnum;
use skirmish::script::Script;
use skirmish::tournament::{ConfigError, GameConfig, GameError};
use skirmish::ScriptError;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `tournament` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum TournamentFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<GameError> for CliError {
    fn from(e: GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("JSON serialization failed: {e}"))
    }
}

/// Load every script, naming each after its file.
fn load_scripts(paths: &[PathBuf]) -> Result<(Vec<Script>, Vec<String>), CliError> {
    let mut scripts = Vec::with_capacity(paths.len());
    let mut names = Vec::with_capacity(paths.len());
    for path in paths {
        let script = Script::load(path).map_err(|e| match e {
            ScriptError::Io { .. } => CliError::new(e.to_string()),
            _ => CliError::new(format!("{}: {e}", path.display())),
        })?;
        scripts.push(script);
        names.push(
            path.file_name()
                .map_or_else(|| "unknown".to_string(), |n| n.to_string_lossy().to_string()),
        );
    }
    Ok((scripts, names))
}

/// Load the config file if given, then apply the turn limit override.
fn load_config(path: Option<&Path>, max_turns: Option<u32>) -> Result<GameConfig, CliError> {
    let mut config = match path {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(turns) = max_turns {
        config.max_turns = turns;
    }
    Ok(config)
}

/// Seed from the clock when none is given.
#[allow(clippy::cast_possible_truncation)]
fn seed_or_random(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    })
}
