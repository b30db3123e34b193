//! Game and tournament runner.
//!
//! Provides a pure function interface: `(seed, scripts, config) -> GameResult`
//!
//! The runner handles:
//! - Board setup with one starting unit per player
//! - Round-robin unit turns driven by each player's script
//! - Eliminations and winner selection
//! - Many games in parallel with rayon

mod config;
mod runner;
mod stats;

pub use config::{ConfigError, GameConfig};
pub use runner::{GameResult, PlayerStats, run_game};
pub use stats::TournamentStats;

use rayon::prelude::*;
use thiserror::Error;
use tracing::warn;

use crate::error::BoardError;
use crate::game::Board;
use crate::script::Script;

/// Maximum number of players in a game.
pub const MAX_PLAYERS: usize = 8;

/// Faults that prevent a game from being played.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GameError {
    /// Not enough players (minimum 2).
    #[error("too few players: {0} (minimum 2)")]
    TooFewPlayers(usize),
    /// Too many players.
    #[error("too many players: {0} (maximum {MAX_PLAYERS})")]
    TooManyPlayers(usize),
    /// The board has no free cell left for a starting unit.
    #[error("board has no room for {0} starting units")]
    NoRoom(usize),
    /// Board setup or a board operation failed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Play `games` games with seeds `base_seed, base_seed + 1, ...` in parallel.
///
/// # Errors
///
/// Returns an error if the player count is out of range or the board
/// configuration is invalid. Games that fail once started are counted in
/// [`TournamentStats::games_failed`].
pub fn run_tournament(
    base_seed: u64,
    games: u64,
    scripts: &[Script],
    config: &GameConfig,
) -> Result<TournamentStats, GameError> {
    run_tournament_with(base_seed, games, scripts, config, |_| {})
}

/// Like [`run_tournament`], calling `on_game` after every game.
///
/// `on_game` runs on the worker threads.
///
/// # Errors
///
/// As [`run_tournament`].
pub fn run_tournament_with<F>(
    base_seed: u64,
    games: u64,
    scripts: &[Script],
    config: &GameConfig,
    on_game: F,
) -> Result<TournamentStats, GameError>
where
    F: Fn(&TournamentStats) + Sync,
{
    runner::check_players(scripts.len())?;
    Board::new(
        config.board_width,
        config.board_height,
        config.unit_limit_pct,
        base_seed,
    )?;
    let num_players = scripts.len();

    // Each worker accumulates its own stats; they are merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(
            || TournamentStats::new(num_players),
            |mut local, i| {
                let seed = base_seed.wrapping_add(i);
                match run_game(seed, scripts, config) {
                    Ok(result) => local.add_result(&result),
                    Err(e) => {
                        warn!(seed, error = %e, "game failed");
                        local.add_failure();
                    }
                }
                on_game(&local);
                local
            },
        )
        .reduce(
            || TournamentStats::new(num_players),
            |mut a, b| {
                a.merge(&b);
                a
            },
        );

    Ok(stats)
}
