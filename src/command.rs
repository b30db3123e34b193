//! Command layer: the registry scripts call into and the engine that runs it.
//!
//! Every request is checked against the registry before it executes. Queries
//! are free, critical actions share a single slot per turn, primitives are
//! pure and `if_else` only evaluates the branch it takes.

mod engine;
mod ops;
mod table;

pub use engine::{Engine, Operand, Thunk};
pub use table::{COMMANDS, CommandKind, CommandSpec, RESERVED, lookup, verify};
