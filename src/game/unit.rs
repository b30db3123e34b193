//! Unit state and lifecycle.

use std::collections::BTreeMap;

use crate::Value;
use crate::game::{Coord, PlayerId};

/// Unique identifier for a unit. Minted by the board, never reused.
pub type UnitId = u32;

/// Outcome of a unit's turn-start bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing pending.
    Ready,
    /// Still counting down to a spawn; the unit cannot act this turn.
    Spawning {
        /// Own turns left before the spawn fires.
        remaining: u32,
    },
    /// The spawn timer elapsed; a child should be placed next to the unit.
    SpawnDue,
}

/// A unit on the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Owning player.
    pub player_id: PlayerId,
    /// Current cell. Kept in sync with the grid by the board.
    pub(crate) location: Coord,
    /// Remaining hit points.
    health: u32,
    /// Whether the next incoming attack is blocked.
    defending: bool,
    /// Own turns left before a pending spawn.
    spawn_timer: Option<u32>,
    /// Script variables bound with `define`.
    vars: BTreeMap<String, Value>,
}

impl Unit {
    /// Create a unit with the given hit points.
    #[must_use]
    pub fn new(id: UnitId, player_id: PlayerId, location: Coord, health: u32) -> Self {
        Self {
            id,
            player_id,
            location,
            health,
            defending: false,
            spawn_timer: None,
            vars: BTreeMap::new(),
        }
    }

    /// Current cell.
    #[must_use]
    pub const fn location(&self) -> Coord {
        self.location
    }

    /// Remaining hit points.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Whether the unit is blocking the next attack.
    #[must_use]
    pub const fn is_defending(&self) -> bool {
        self.defending
    }

    /// A unit waiting on a spawn timer cannot perform critical actions.
    #[must_use]
    pub const fn can_act(&self) -> bool {
        self.spawn_timer.is_none()
    }

    /// Own turns left before the pending spawn, if any.
    #[must_use]
    pub const fn spawn_timer(&self) -> Option<u32> {
        self.spawn_timer
    }

    /// Apply `amount` damage. Returns `true` if the unit died.
    ///
    /// A defending unit absorbs the hit entirely and drops its guard.
    pub fn damage(&mut self, amount: u32) -> bool {
        if self.defending {
            self.defending = false;
            return false;
        }
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    /// Block the next incoming attack until this unit's next turn.
    pub fn defend(&mut self) {
        self.defending = true;
    }

    /// Skip the next `turns` own turns, then spawn a child.
    pub fn set_spawn(&mut self, turns: u32) {
        self.spawn_timer = Some(turns);
    }

    /// Turn-start bookkeeping: drop the guard and advance the spawn timer.
    pub fn tick(&mut self) -> Tick {
        self.defending = false;
        match self.spawn_timer {
            None => Tick::Ready,
            Some(0) => {
                self.spawn_timer = None;
                Tick::SpawnDue
            }
            Some(n) => {
                self.spawn_timer = Some(n - 1);
                Tick::Spawning { remaining: n - 1 }
            }
        }
    }

    /// Read a script variable.
    #[must_use]
    pub fn var(&self, symbol: &str) -> Option<Value> {
        self.vars.get(symbol).copied()
    }

    /// Bind a script variable.
    pub fn define(&mut self, symbol: impl Into<String>, value: Value) {
        self.vars.insert(symbol.into(), value);
    }

    /// All bound variables, ordered by name.
    #[must_use]
    pub fn vars(&self) -> &BTreeMap<String, Value> {
        &self.vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Unit {
        Unit::new(1, 1, Coord::new(0, 0), 2)
    }

    #[test]
    fn test_damage_kills() {
        let mut u = unit();
        assert!(!u.damage(1));
        assert_eq!(u.health(), 1);
        assert!(u.damage(5));
        assert_eq!(u.health(), 0);
    }

    #[test]
    fn test_defend_blocks_one_attack() {
        let mut u = unit();
        u.defend();
        assert!(!u.damage(10));
        assert_eq!(u.health(), 2);
        assert!(!u.is_defending());
        assert!(u.damage(2));
    }

    #[test]
    fn test_defend_expires_on_tick() {
        let mut u = unit();
        u.defend();
        assert_eq!(u.tick(), Tick::Ready);
        assert!(!u.is_defending());
    }

    #[test]
    fn test_spawn_timer_countdown() {
        let mut u = unit();
        u.set_spawn(3);
        assert!(!u.can_act());
        assert_eq!(u.tick(), Tick::Spawning { remaining: 2 });
        assert_eq!(u.tick(), Tick::Spawning { remaining: 1 });
        assert_eq!(u.tick(), Tick::Spawning { remaining: 0 });
        assert!(!u.can_act());
        assert_eq!(u.tick(), Tick::SpawnDue);
        assert!(u.can_act());
        assert_eq!(u.tick(), Tick::Ready);
    }

    #[test]
    fn test_vars() {
        let mut u = unit();
        assert_eq!(u.var("x"), None);
        u.define("x", Value::Int(4));
        u.define("x", Value::Bool(true));
        assert_eq!(u.var("x"), Some(Value::Bool(true)));
        assert_eq!(u.vars().len(), 1);
    }
}
