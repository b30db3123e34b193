//! Simulation state: the board, the scheduler and the rules they run under.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{BoardResult, CommandError, CommandResult};
use crate::game::{Board, Coord, PlayerId, Tick, TurnHandler, Unit, UnitId};

/// Tunable game rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Damage dealt by `attack`.
    pub attack_damage: u32,
    /// Hit points of a freshly spawned unit.
    pub unit_health: u32,
    /// Own turns a unit sits out after `spawn` before its child appears.
    pub spawn_delay: u32,
    /// Commands a single turn may dispatch before it is aborted.
    pub step_limit: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            attack_damage: 1,
            unit_health: 2,
            spawn_delay: 3,
            step_limit: 1_000,
        }
    }
}

/// Complete simulation state.
///
/// Every operation that touches units goes through here so the board and
/// the scheduler queue are always updated together.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The board.
    pub board: Board,
    /// The scheduler.
    pub turns: TurnHandler,
    /// Rules in force.
    pub rules: Rules,
}

impl GameState {
    /// Wrap a board with a fresh scheduler.
    #[must_use]
    pub fn new(board: Board, rules: Rules) -> Self {
        Self {
            board: board.with_unit_health(rules.unit_health),
            turns: TurnHandler::new(),
            rules,
        }
    }

    /// Spawn a unit and schedule it.
    ///
    /// # Errors
    ///
    /// See [`Board::spawn`].
    pub fn spawn(&mut self, player: PlayerId, loc: Coord) -> BoardResult<Option<UnitId>> {
        self.board.spawn(player, loc, &mut self.turns)
    }

    /// Remove a unit from the board and the schedule.
    pub fn despawn(&mut self, unit: UnitId) -> Option<Unit> {
        self.board.despawn(unit, &mut self.turns)
    }

    /// The unit acting this turn.
    #[must_use]
    pub const fn current_unit(&self) -> Option<UnitId> {
        self.turns.current_unit()
    }

    /// The player owning the acting unit.
    #[must_use]
    pub fn current_player(&self) -> Option<PlayerId> {
        self.acting_unit().ok().map(|u| u.player_id)
    }

    /// The acting unit.
    ///
    /// # Errors
    ///
    /// [`CommandError::NoActingUnit`] outside a turn or after the acting unit
    /// was removed.
    pub fn acting_unit(&self) -> CommandResult<&Unit> {
        self.current_unit()
            .and_then(|id| self.board.unit(id))
            .ok_or(CommandError::NoActingUnit)
    }

    /// The acting unit, mutably.
    ///
    /// # Errors
    ///
    /// [`CommandError::NoActingUnit`] outside a turn.
    pub fn acting_unit_mut(&mut self) -> CommandResult<&mut Unit> {
        let id = self.current_unit().ok_or(CommandError::NoActingUnit)?;
        self.board.unit_mut(id).ok_or(CommandError::NoActingUnit)
    }

    /// Turns started so far.
    #[must_use]
    pub const fn turn_number(&self) -> u32 {
        self.turns.turn_number()
    }

    /// Start a turn: pick the next unit, reset the critical gate and run the
    /// unit's turn-start bookkeeping (guard drop, spawn countdown).
    ///
    /// Returns the acting unit, or `None` if nobody is scheduled.
    ///
    /// # Errors
    ///
    /// Propagates board faults from a due spawn.
    pub fn start_turn(&mut self) -> BoardResult<Option<UnitId>> {
        let Some(id) = self.turns.start_turn() else {
            return Ok(None);
        };
        let Some(unit) = self.board.unit_mut(id) else {
            return Ok(Some(id));
        };
        let (player, loc) = (unit.player_id, unit.location());
        match unit.tick() {
            Tick::Ready => {}
            Tick::Spawning { remaining } => {
                debug!(unit = id, remaining, "unit is preparing to spawn");
            }
            Tick::SpawnDue => {
                let child = self
                    .board
                    .spawn_in_adjacent_location(player, loc, &mut self.turns)?;
                debug!(unit = id, ?child, "spawn timer elapsed");
            }
        }
        Ok(Some(id))
    }

    /// End the turn and requeue the acting unit.
    pub fn end_turn(&mut self) {
        self.turns.end_turn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::check_invariants;

    fn state() -> GameState {
        let mut board = Board::new(10, 10, 0.5, 11).unwrap();
        board.add_player(1);
        board.add_player(2);
        GameState::new(board, Rules::default())
    }

    #[test]
    fn test_rules_from_partial_json() {
        let rules: Rules = serde_json::from_str(r#"{"attack_damage": 3}"#).unwrap();
        assert_eq!(rules.attack_damage, 3);
        assert_eq!(rules.spawn_delay, Rules::default().spawn_delay);
    }

    #[test]
    fn test_unit_health_follows_rules() {
        let board = Board::new(5, 5, 0.5, 0).unwrap();
        let rules = Rules {
            unit_health: 5,
            ..Rules::default()
        };
        let mut state = GameState::new(board, rules);
        state.board.add_player(1);
        let id = state.spawn(1, Coord::new(0, 0)).unwrap().unwrap();
        assert_eq!(state.board.unit(id).unwrap().health(), 5);
    }

    #[test]
    fn test_acting_unit() {
        let mut state = state();
        assert_eq!(state.acting_unit(), Err(CommandError::NoActingUnit));
        let id = state.spawn(1, Coord::new(1, 1)).unwrap().unwrap();
        assert_eq!(state.start_turn(), Ok(Some(id)));
        assert_eq!(state.current_player(), Some(1));
        assert_eq!(state.acting_unit().unwrap().id, id);
    }

    #[test]
    fn test_spawn_timer_produces_child() {
        let mut state = state();
        let id = state.spawn(1, Coord::new(4, 4)).unwrap().unwrap();
        state.board.unit_mut(id).unwrap().set_spawn(2);

        for _ in 0..2 {
            state.start_turn().unwrap();
            assert!(!state.acting_unit().unwrap().can_act());
            state.end_turn();
        }
        assert_eq!(state.board.player(1).unwrap().num_units(), 1);

        state.start_turn().unwrap();
        assert!(state.acting_unit().unwrap().can_act());
        assert_eq!(state.board.player(1).unwrap().num_units(), 2);
        state.end_turn();
        assert!(check_invariants(&state).is_empty());
    }

    #[test]
    fn test_defend_drops_on_own_turn() {
        let mut state = state();
        let id = state.spawn(1, Coord::new(4, 4)).unwrap().unwrap();
        state.board.unit_mut(id).unwrap().defend();
        state.start_turn().unwrap();
        assert!(!state.board.unit(id).unwrap().is_defending());
    }
}
