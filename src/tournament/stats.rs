//! Aggregated tournament statistics.

use serde::Serialize;

use crate::tournament::GameResult;

/// Totals over many games between the same scripts.
///
/// Built per worker thread and combined with [`TournamentStats::merge`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TournamentStats {
    /// Total games played.
    pub games_played: u64,
    /// Games that could not be played.
    pub games_failed: u64,
    /// Outright wins per player.
    pub wins: Vec<u64>,
    /// Games that ended with more than one winner.
    pub draws: u64,
    /// Final unit count per player, summed.
    total_units: Vec<f64>,
    /// Sum of squared final unit counts, for the standard deviation.
    units_sq_sums: Vec<f64>,
    /// Script faults per player, summed.
    total_faults: Vec<u64>,
    /// Total turns across all games.
    total_turns: u64,
}

impl TournamentStats {
    /// Create empty stats for `num_players` players.
    #[must_use]
    pub fn new(num_players: usize) -> Self {
        Self {
            games_played: 0,
            games_failed: 0,
            wins: vec![0; num_players],
            draws: 0,
            total_units: vec![0.0; num_players],
            units_sq_sums: vec![0.0; num_players],
            total_faults: vec![0; num_players],
            total_turns: 0,
        }
    }

    /// Number of players tracked.
    #[must_use]
    pub fn num_players(&self) -> usize {
        self.wins.len()
    }

    /// Add a game result.
    pub fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.winner() {
            Some(winner) => {
                if let Some(wins) = self.wins.get_mut(usize::from(winner).wrapping_sub(1)) {
                    *wins += 1;
                }
            }
            None => self.draws += 1,
        }

        for (i, stats) in result.player_stats.iter().enumerate().take(self.num_players()) {
            #[allow(clippy::cast_precision_loss)]
            let units = stats.final_units as f64;
            self.total_units[i] += units;
            self.units_sq_sums[i] += units * units;
            self.total_faults[i] += u64::from(stats.faults);
        }
    }

    /// Record a game that failed to run.
    pub fn add_failure(&mut self) {
        self.games_failed += 1;
    }

    /// Fold another worker's totals into these.
    pub fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.games_failed += other.games_failed;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_units.iter_mut().zip(&other.total_units) {
            *a += b;
        }
        for (a, b) in self.units_sq_sums.iter_mut().zip(&other.units_sq_sums) {
            *a += b;
        }
        for (a, b) in self.total_faults.iter_mut().zip(&other.total_faults) {
            *a += b;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn per_game(&self, total: f64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total / self.games_played as f64
    }

    /// Share of games won outright by a player (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn win_rate(&self, player_idx: usize) -> f64 {
        self.per_game(self.wins.get(player_idx).copied().unwrap_or(0) as f64)
    }

    /// Share of games without a single winner (0.0-1.0).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn draw_rate(&self) -> f64 {
        self.per_game(self.draws as f64)
    }

    /// Average final unit count for a player.
    #[must_use]
    pub fn avg_units(&self, player_idx: usize) -> f64 {
        self.per_game(self.total_units.get(player_idx).copied().unwrap_or(0.0))
    }

    /// Standard deviation of a player's final unit count.
    #[must_use]
    pub fn units_std_dev(&self, player_idx: usize) -> f64 {
        let mean = self.avg_units(player_idx);
        let sq_mean = self.per_game(self.units_sq_sums.get(player_idx).copied().unwrap_or(0.0));
        (sq_mean - mean * mean).max(0.0).sqrt()
    }

    /// Average script faults per game for a player.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_faults(&self, player_idx: usize) -> f64 {
        self.per_game(self.total_faults.get(player_idx).copied().unwrap_or(0) as f64)
    }

    /// Average game length in turns.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_turns(&self) -> f64 {
        self.per_game(self.total_turns as f64)
    }
}
