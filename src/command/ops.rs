//! Command bodies.
//!
//! Queries read the board around the acting unit, critical actions mutate
//! it, primitives are pure functions over values.

use tracing::{debug, info};

use crate::Value;
use crate::error::{CommandError, CommandResult};
use crate::game::{GameState, Unit, UnitId};

// ----------------------------------------------------------------------
// Queries
// ----------------------------------------------------------------------

pub(super) fn get_unit_id(_: &GameState, unit: &Unit) -> Value {
    Value::from(unit.id)
}

pub(super) fn get_turn_number(state: &GameState, _: &Unit) -> Value {
    Value::from(state.turn_number())
}

pub(super) fn num_adjacent_allies(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.num_allies_around(unit))
}

pub(super) fn num_adjacent_enemies(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.num_enemies_around(unit))
}

pub(super) fn num_free_tiles_around(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.num_free_tiles_around(unit))
}

pub(super) fn num_total_allies(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.num_total_allies(unit.player_id))
}

pub(super) fn num_total_enemies(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.num_total_enemies(unit.player_id))
}

pub(super) fn distance_from_closest_ally(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.distance_from_closest_ally(unit))
}

pub(super) fn distance_from_closest_enemy(state: &GameState, unit: &Unit) -> Value {
    Value::from(state.board.distance_from_closest_enemy(unit))
}

// ----------------------------------------------------------------------
// Critical actions
// ----------------------------------------------------------------------

/// Attack a random adjacent enemy.
pub(super) fn attack(state: &mut GameState, unit: UnitId) -> CommandResult<()> {
    let dmg = state.rules.attack_damage;
    state
        .board
        .attack_adjacent_enemy(unit, dmg, &mut state.turns)?;
    Ok(())
}

/// Step onto a random free adjacent cell.
pub(super) fn move_to_free_cell(state: &mut GameState, unit: UnitId) -> CommandResult<()> {
    let from = state.acting_unit()?.location();
    let Some(to) = state.board.free_adjacent(from) else {
        debug!(unit, "tried to move, but no free adjacent cell");
        return Ok(());
    };
    state.board.move_unit(unit, to)?;
    debug!(unit, %from, %to, "unit moved");
    Ok(())
}

/// Sit out a few turns, then spawn a child next to this unit.
pub(super) fn spawn(state: &mut GameState, unit: UnitId) -> CommandResult<()> {
    let delay = state.rules.spawn_delay;
    let acting = state.acting_unit_mut()?;
    acting.set_spawn(delay);
    debug!(unit, player = acting.player_id, delay, "setting spawn timer");
    Ok(())
}

/// Forfeit the turn.
pub(super) fn wait(_: &mut GameState, unit: UnitId) -> CommandResult<()> {
    debug!(unit, "unit has forfeited its turn");
    Ok(())
}

/// Block the next incoming attack.
pub(super) fn defend(state: &mut GameState, unit: UnitId) -> CommandResult<()> {
    state.acting_unit_mut()?.defend();
    debug!(unit, "unit is defending");
    Ok(())
}

// ----------------------------------------------------------------------
// Primitives
// ----------------------------------------------------------------------

// Integer arithmetic wraps instead of faulting; only `div` may fault.

pub(super) fn add(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Int(a.as_int().wrapping_add(b.as_int())))
}

pub(super) fn sub(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Int(a.as_int().wrapping_sub(b.as_int())))
}

pub(super) fn mul(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Int(a.as_int().wrapping_mul(b.as_int())))
}

pub(super) fn div(a: Value, b: Value) -> CommandResult<Value> {
    let divisor = b.as_int();
    if divisor == 0 {
        return Err(CommandError::DivisionByZero);
    }
    Ok(Value::Int(a.as_int().wrapping_div(divisor)))
}

/// `Nil` only equals `Nil`; booleans compare as 0/1 against integers.
pub(super) fn eq(a: Value, b: Value) -> CommandResult<Value> {
    let equal = match (a, b) {
        (Value::Nil, Value::Nil) => true,
        (Value::Nil, _) | (_, Value::Nil) => false,
        _ => a.as_int() == b.as_int(),
    };
    Ok(Value::Bool(equal))
}

pub(super) fn gt(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Bool(a.as_int() > b.as_int()))
}

pub(super) fn gqt(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Bool(a.as_int() >= b.as_int()))
}

pub(super) fn lt(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Bool(a.as_int() < b.as_int()))
}

pub(super) fn lqt(a: Value, b: Value) -> CommandResult<Value> {
    Ok(Value::Bool(a.as_int() <= b.as_int()))
}

pub(super) fn neg(a: Value) -> CommandResult<Value> {
    Ok(Value::Bool(!a.is_truthy()))
}

pub(super) fn print(a: Value) -> CommandResult<Value> {
    info!(value = %a, "script output");
    Ok(a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        assert_eq!(add(Value::Int(2), Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(sub(Value::Int(2), Value::Int(3)), Ok(Value::Int(-1)));
        assert_eq!(mul(Value::Int(-2), Value::Int(3)), Ok(Value::Int(-6)));
        assert_eq!(div(Value::Int(7), Value::Int(2)), Ok(Value::Int(3)));
        assert_eq!(div(Value::Int(-7), Value::Int(2)), Ok(Value::Int(-3)));
    }

    #[test]
    fn test_div_by_zero() {
        assert_eq!(
            div(Value::Int(5), Value::Int(0)),
            Err(CommandError::DivisionByZero)
        );
        assert_eq!(div(Value::Int(5), Value::Nil), Err(CommandError::DivisionByZero));
    }

    #[test]
    fn test_overflow_wraps() {
        assert_eq!(
            add(Value::Int(i64::MAX), Value::Int(1)),
            Ok(Value::Int(i64::MIN))
        );
        assert_eq!(
            div(Value::Int(i64::MIN), Value::Int(-1)),
            Ok(Value::Int(i64::MIN))
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(eq(Value::Bool(true), Value::Int(1)), Ok(Value::Bool(true)));
        assert_eq!(eq(Value::Bool(false), Value::Int(0)), Ok(Value::Bool(true)));
        assert_eq!(eq(Value::Nil, Value::Nil), Ok(Value::Bool(true)));
        assert_eq!(eq(Value::Nil, Value::Int(0)), Ok(Value::Bool(false)));
        assert_eq!(eq(Value::Bool(false), Value::Nil), Ok(Value::Bool(false)));
        assert_eq!(gt(Value::Int(3), Value::Int(3)), Ok(Value::Bool(false)));
        assert_eq!(gqt(Value::Int(3), Value::Int(3)), Ok(Value::Bool(true)));
        assert_eq!(lt(Value::Nil, Value::Int(1)), Ok(Value::Bool(true)));
        assert_eq!(lqt(Value::Int(2), Value::Int(1)), Ok(Value::Bool(false)));
    }

    #[test]
    fn test_neg() {
        assert_eq!(neg(Value::Bool(true)), Ok(Value::Bool(false)));
        assert_eq!(neg(Value::Int(0)), Ok(Value::Bool(true)));
        assert_eq!(neg(Value::Nil), Ok(Value::Bool(true)));
    }
}
