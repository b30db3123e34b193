//! Output formatting utilities for CLI.

use serde::Serialize;
use skirmish::tournament::{GameResult, TournamentStats};
use std::fmt::Write;

fn name_of(names: &[String], player: u8) -> &str {
    usize::from(player)
        .checked_sub(1)
        .and_then(|i| names.get(i))
        .map_or("Unknown", String::as_str)
}

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult, names: &[String]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    match result.winners.as_slice() {
        [] => output.push_str("  Winner: none\n"),
        [winner] => {
            let _ = writeln!(output, "  Winner: Player {winner} ({})", name_of(names, *winner));
        }
        tied => {
            let tied: Vec<String> = tied
                .iter()
                .map(|p| format!("Player {p} ({})", name_of(names, *p)))
                .collect();
            let _ = writeln!(output, "  Draw: {}", tied.join(", "));
        }
    }
    let _ = writeln!(output, "  Turns: {}\n", result.turns_played);

    for stats in &result.player_stats {
        let _ = write!(
            output,
            "  Player {}: {} units, {} spawned, {} faults ({})",
            stats.player_id,
            stats.final_units,
            stats.units_spawned,
            stats.faults,
            name_of(names, stats.player_id)
        );
        if let Some(turn) = stats.eliminated_turn {
            let _ = write!(output, " [eliminated turn {turn}]");
        }
        output.push('\n');
    }

    output
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// First seed used.
    base_seed: u64,
    /// Total games played.
    games_played: u64,
    /// Games that failed to run.
    games_failed: u64,
    /// Per-player statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of draws.
    draws: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-player tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Player id (1-based).
    player: usize,
    /// Script filename.
    script: String,
    /// Number of outright wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average final unit count.
    avg_units: f64,
    /// Final unit count standard deviation.
    units_std_dev: f64,
    /// Average script faults per game.
    avg_faults: f64,
}

impl JsonTournamentResult {
    /// Create from stats and script names.
    pub(super) fn from_stats(stats: &TournamentStats, names: &[String], base_seed: u64) -> Self {
        let players = (0..names.len())
            .map(|i| JsonTournamentPlayer {
                player: i + 1,
                script: names.get(i).cloned().unwrap_or_default(),
                wins: stats.wins.get(i).copied().unwrap_or(0),
                win_rate: stats.win_rate(i),
                avg_units: stats.avg_units(i),
                units_std_dev: stats.units_std_dev(i),
                avg_faults: stats.avg_faults(i),
            })
            .collect();

        Self {
            base_seed,
            games_played: stats.games_played,
            games_failed: stats.games_failed,
            players,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, names: &[String]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, name) in names.iter().enumerate() {
        let wins = stats.wins.get(i).copied().unwrap_or(0);
        let rate = stats.win_rate(i) * 100.0;
        let _ = writeln!(output, "  Player {} ({name}): {rate:.1}% ({wins} wins)", i + 1);
    }
    let _ = writeln!(
        output,
        "  Draws: {} ({:.1}%)\n",
        stats.draws,
        stats.draw_rate() * 100.0
    );

    output.push_str("Average Final Units:\n");
    for (i, name) in names.iter().enumerate() {
        let _ = writeln!(
            output,
            "  Player {} ({name}): {:.1} (+/- {:.1}), {:.1} faults/game",
            i + 1,
            stats.avg_units(i),
            stats.units_std_dev(i),
            stats.avg_faults(i)
        );
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.avg_turns());
    if stats.games_failed > 0 {
        let _ = writeln!(output, "Failed Games: {}", stats.games_failed);
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, names: &[String]) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,script,wins,win_rate,avg_units,units_std_dev,avg_faults\n");

    // Data rows
    for (i, name) in names.iter().enumerate() {
        let _ = writeln!(
            output,
            "{},{},{},{:.4},{:.2},{:.2},{:.2}",
            i + 1,
            name,
            stats.wins.get(i).copied().unwrap_or(0),
            stats.win_rate(i),
            stats.avg_units(i),
            stats.units_std_dev(i),
            stats.avg_faults(i)
        );
    }

    output
}
