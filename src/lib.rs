// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Skirmish: a turn-based battle simulator for scripted units.
//!
//! Players fight on a toroidal grid. Every unit runs its player's script once
//! per turn; the script calls into a closed command table to inspect the
//! board and take at most one state-changing action.
//!
//! - Deterministic games from a seed
//! - Commands validated before anything executes
//! - Parallel tournaments with rayon
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │        Tournament Runner            │
//! ├─────────────────────────────────────┤
//! │   Scripts (s-expressions / JSON)    │
//! ├─────────────────────────────────────┤
//! │   Command Table + Engine            │
//! ├─────────────────────────────────────┤
//! │   Board, Units, Turn Scheduler      │
//! └─────────────────────────────────────┘
//! ```

pub mod command;
pub mod error;
pub mod game;
pub mod logging;
pub mod script;
pub mod tournament;
pub mod value;

pub use error::{BoardError, CommandError, ScriptError};

// Re-export key types at crate root for convenience
pub use command::Engine;
pub use game::{Board, Coord, GameState, PlayerId, Rules, UnitId};
pub use script::Script;
pub use tournament::{GameConfig, GameResult, run_game, run_tournament};
pub use value::Value;
