//! Consistency checks between grid, rosters, unit arena and scheduler.
//!
//! These should never trigger. A violation means some operation updated one
//! of the places a unit lives in without the others.

use thiserror::Error;

use crate::game::GameState;

/// Invariant violation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invariant violation: {message}")]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl InvariantViolation {
    fn new(message: String) -> Self {
        Self { message }
    }
}

/// Check all board invariants.
///
/// Returns every violation found, or an empty list if the state is sound.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let board = &state.board;
    let mut violations = Vec::new();

    // Grid -> unit: every occupied cell points at a unit standing there.
    for (coord, occupant) in board.grid().iter() {
        let Some(id) = occupant else { continue };
        match board.unit(id) {
            None => violations.push(InvariantViolation::new(format!(
                "cell {coord} references missing unit {id}"
            ))),
            Some(unit) if unit.location() != coord => {
                violations.push(InvariantViolation::new(format!(
                    "cell {coord} holds unit {id} whose location is {}",
                    unit.location()
                )));
            }
            Some(_) => {}
        }
    }

    // Unit -> grid, roster and queue.
    for unit in board.units() {
        if board.grid().get(unit.location()) != Some(unit.id) {
            violations.push(InvariantViolation::new(format!(
                "unit {} at {} is not on its grid cell",
                unit.id,
                unit.location()
            )));
        }
        if !board.player(unit.player_id).is_some_and(|p| p.owns(unit.id)) {
            violations.push(InvariantViolation::new(format!(
                "unit {} missing from roster of player {}",
                unit.id, unit.player_id
            )));
        }
        if !state.turns.contains(unit.id) {
            violations.push(InvariantViolation::new(format!(
                "unit {} is not scheduled",
                unit.id
            )));
        }
    }

    // Roster -> unit.
    for player in board.players() {
        for id in player.units() {
            if board.unit(id).is_none_or(|u| u.player_id != player.id) {
                violations.push(InvariantViolation::new(format!(
                    "player {} lists unit {id} it does not own",
                    player.id
                )));
            }
        }
        if player.num_units() > board.unit_limit() {
            violations.push(InvariantViolation::new(format!(
                "player {} has {} units, over the limit of {}",
                player.id,
                player.num_units(),
                board.unit_limit()
            )));
        }
    }

    let occupied = board.grid().iter().filter(|(_, o)| o.is_some()).count();
    if occupied != board.units().count() {
        violations.push(InvariantViolation::new(format!(
            "{occupied} occupied cells but {} live units",
            board.units().count()
        )));
    }

    violations
}
