//! Single-game driver.

use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::command::Engine;
use crate::game::{Board, BoardSnapshot, GameState, PlayerId, SnapshotLabel, check_invariants};
use crate::script::Script;
use crate::tournament::{GameConfig, GameError, MAX_PLAYERS};

/// Per-player outcome of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerStats {
    /// Player identifier (1-based, in script order).
    pub player_id: PlayerId,
    /// Units on the board when the game ended.
    pub final_units: usize,
    /// Units spawned during play, not counting the starting unit.
    pub units_spawned: u32,
    /// Turns whose script ended in a fault.
    pub faults: u32,
    /// Turn the player lost its last unit (None if it survived).
    pub eliminated_turn: Option<u32>,
}

impl PlayerStats {
    const fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            final_units: 0,
            units_spawned: 0,
            faults: 0,
            eliminated_turn: None,
        }
    }
}

/// Final result of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameResult {
    /// The seed used for this game.
    pub seed: u64,
    /// The sole survivor, or every survivor tied on the highest unit count.
    pub winners: Vec<PlayerId>,
    /// Total turns played.
    pub turns_played: u32,
    /// Per-player statistics.
    pub player_stats: Vec<PlayerStats>,
    /// Elimination order (first eliminated is index 0).
    pub elimination_order: Vec<PlayerId>,
    /// The board when the game ended, labelled by player.
    pub final_board: BoardSnapshot,
}

impl GameResult {
    /// The winner, if the game has exactly one.
    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        match self.winners.as_slice() {
            [winner] => Some(*winner),
            _ => None,
        }
    }
}

/// Run a complete game with the given seed and one script per player.
///
/// Player `i + 1` runs `scripts[i]`. Each player starts with one unit on a
/// distinct random cell. Units take turns round-robin, each running its
/// player's script once per turn, until one player is left or
/// `config.max_turns` turns have been played.
///
/// # Determinism
///
/// Given the same seed, scripts and config, this always produces the same
/// [`GameResult`].
///
/// # Errors
///
/// Returns an error if:
/// - Number of players is outside `2..=MAX_PLAYERS`
/// - The board dimensions or unit limit are invalid
/// - The board has no room for the starting units
pub fn run_game(seed: u64, scripts: &[Script], config: &GameConfig) -> Result<GameResult, GameError> {
    let runner = GameRunner::new(seed, scripts, config)?;
    runner.run()
}

/// Check the player count for a game.
pub(super) fn check_players(num_players: usize) -> Result<(), GameError> {
    if num_players < 2 {
        return Err(GameError::TooFewPlayers(num_players));
    }
    if num_players > MAX_PLAYERS {
        return Err(GameError::TooManyPlayers(num_players));
    }
    Ok(())
}

struct GameRunner<'a> {
    state: GameState,
    engine: Engine,
    scripts: &'a [Script],
    stats: Vec<PlayerStats>,
    max_turns: u32,
    seed: u64,
    elimination_order: Vec<PlayerId>,
}

impl<'a> GameRunner<'a> {
    fn new(seed: u64, scripts: &'a [Script], config: &GameConfig) -> Result<Self, GameError> {
        check_players(scripts.len())?;

        let board = Board::new(
            config.board_width,
            config.board_height,
            config.unit_limit_pct,
            seed,
        )?;
        let mut state = GameState::new(board, config.rules);

        let mut stats = Vec::with_capacity(scripts.len());
        for i in 0..scripts.len() {
            let player_id = PlayerId::try_from(i + 1)
                .map_err(|_| GameError::TooManyPlayers(scripts.len()))?;
            state.board.add_player(player_id);
            let loc = state
                .board
                .random_free_location()
                .ok_or(GameError::NoRoom(scripts.len()))?;
            state
                .spawn(player_id, loc)?
                .ok_or(GameError::NoRoom(scripts.len()))?;
            stats.push(PlayerStats::new(player_id));
        }

        info!(
            seed,
            players = scripts.len(),
            width = config.board_width,
            height = config.board_height,
            unit_limit = state.board.unit_limit(),
            "game started"
        );

        Ok(Self {
            engine: Engine::for_rules(&config.rules),
            state,
            scripts,
            stats,
            max_turns: config.max_turns,
            seed,
            elimination_order: Vec::new(),
        })
    }

    fn run(mut self) -> Result<GameResult, GameError> {
        while self.state.turn_number() < self.max_turns && self.players_left() > 1 {
            if !self.execute_turn()? {
                break;
            }
        }
        Ok(self.build_result())
    }

    fn players_left(&self) -> usize {
        self.state.board.players().count()
    }

    /// Play one unit's turn. Returns false if nobody is left to schedule.
    fn execute_turn(&mut self) -> Result<bool, GameError> {
        let spawned_before = self.state.board.num_spawned();
        let Some(unit) = self.state.start_turn()? else {
            return Ok(false);
        };
        let turn = self.state.turn_number();
        let Some(player) = self.state.current_player() else {
            self.state.end_turn();
            return Ok(true);
        };
        let idx = usize::from(player) - 1;

        if let Some(script) = self.scripts.get(idx) {
            match script.run_turn(&mut self.engine, &mut self.state) {
                Ok(value) => trace!(turn, unit, player, %value, "turn finished"),
                Err(e) => {
                    warn!(turn, unit, player, error = %e, "script fault");
                    if let Some(stats) = self.stats.get_mut(idx) {
                        stats.faults += 1;
                    }
                }
            }
        }

        let spawned = self.state.board.num_spawned() - spawned_before;
        if let Some(stats) = self.stats.get_mut(idx) {
            stats.units_spawned += spawned;
        }

        self.state.end_turn();
        self.update_eliminations(turn);

        trace!(turn, "\n{}", self.state.board.snapshot(SnapshotLabel::Player));
        debug_assert!(
            check_invariants(&self.state).is_empty(),
            "{:?}",
            check_invariants(&self.state)
        );
        Ok(true)
    }

    fn update_eliminations(&mut self, turn: u32) {
        let eliminated: Vec<PlayerId> = self
            .state
            .board
            .players()
            .filter(|p| p.is_eliminated())
            .map(|p| p.id)
            .collect();
        for player in eliminated {
            self.state.board.remove_player(player);
            if let Some(stats) = self.stats.iter_mut().find(|s| s.player_id == player) {
                stats.eliminated_turn = Some(turn);
            }
            self.elimination_order.push(player);
            info!(turn, player, "player eliminated");
        }
    }

    fn build_result(mut self) -> GameResult {
        for stats in &mut self.stats {
            stats.final_units = self
                .state
                .board
                .player(stats.player_id)
                .map_or(0, |p| p.num_units());
        }

        let best = self
            .stats
            .iter()
            .filter(|s| s.eliminated_turn.is_none())
            .map(|s| s.final_units)
            .max();
        let winners: Vec<PlayerId> = self
            .stats
            .iter()
            .filter(|s| s.eliminated_turn.is_none() && Some(s.final_units) == best)
            .map(|s| s.player_id)
            .collect();

        let turns_played = self.state.turn_number();
        info!(seed = self.seed, turns_played, ?winners, "game over");
        debug!(order = ?self.elimination_order, "elimination order");

        GameResult {
            seed: self.seed,
            winners,
            turns_played,
            final_board: self.state.board.snapshot(SnapshotLabel::Player),
            player_stats: self.stats,
            elimination_order: self.elimination_order,
        }
    }
}
