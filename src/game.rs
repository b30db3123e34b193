//! Game layer: the toroidal board and everything that lives on it.
//!
//! - Grid with wrap-around coordinates
//! - Board with unit arena, player rosters and the unit cap
//! - Units and their lifecycle (health, defend, spawn timer, variables)
//! - Round-robin turn scheduler with the critical-action gate
//! - Text snapshots and consistency checks

mod board;
mod grid;
mod invariants;
mod player;
mod snapshot;
mod state;
mod turn;
mod unit;

pub use board::{Board, DEFAULT_UNIT_HEALTH, MIN_SIDE};
pub use grid::{Coord, Grid};
pub use invariants::{InvariantViolation, check_invariants};
pub use player::{Player, PlayerId};
pub use snapshot::{BoardSnapshot, EMPTY_CELL, SnapshotLabel};
pub use state::{GameState, Rules};
pub use turn::{TurnHandler, UnitQueue};
pub use unit::{Tick, Unit, UnitId};
