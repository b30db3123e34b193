//! The closed command registry.
//!
//! Every name a script may call is listed here with its arity and
//! classification. Nothing is added or removed at runtime; a name that is
//! not in [`COMMANDS`] is rejected before anything executes.

use std::fmt;

use crate::Value;
use crate::command::ops;
use crate::error::{CommandError, CommandResult};
use crate::game::{GameState, Unit, UnitId};

/// Administrative entry points that scripts may never invoke.
pub const RESERVED: [&str; 2] = ["verify", "execute"];

/// Classification of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Reads board state; no side effects; unlimited per turn.
    Query,
    /// Mutates state; at most one per turn, only if the unit can act.
    Critical,
    /// Pure function over values.
    Primitive,
    /// Lazy branching.
    Control,
    /// Writes the acting unit's variable store.
    Binding,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Query => "query",
            Self::Critical => "critical",
            Self::Primitive => "primitive",
            Self::Control => "control",
            Self::Binding => "binding",
        };
        write!(f, "{name}")
    }
}

/// Typed command body.
#[derive(Clone, Copy)]
pub(crate) enum Handler {
    Query(fn(&GameState, &Unit) -> Value),
    Critical(fn(&mut GameState, UnitId) -> CommandResult<()>),
    Unary(fn(Value) -> CommandResult<Value>),
    Binary(fn(Value, Value) -> CommandResult<Value>),
    IfElse,
    Define,
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Query(_) => "Query",
            Self::Critical(_) => "Critical",
            Self::Unary(_) => "Unary",
            Self::Binary(_) => "Binary",
            Self::IfElse => "IfElse",
            Self::Define => "Define",
        };
        f.write_str(name)
    }
}

/// A command descriptor.
#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    /// Name scripts call it by.
    pub name: &'static str,
    /// Exact number of operands.
    pub arity: usize,
    /// Classification.
    pub kind: CommandKind,
    pub(crate) handler: Handler,
}

const fn query(name: &'static str, f: fn(&GameState, &Unit) -> Value) -> CommandSpec {
    CommandSpec {
        name,
        arity: 0,
        kind: CommandKind::Query,
        handler: Handler::Query(f),
    }
}

const fn critical(
    name: &'static str,
    f: fn(&mut GameState, UnitId) -> CommandResult<()>,
) -> CommandSpec {
    CommandSpec {
        name,
        arity: 0,
        kind: CommandKind::Critical,
        handler: Handler::Critical(f),
    }
}

const fn unary(name: &'static str, f: fn(Value) -> CommandResult<Value>) -> CommandSpec {
    CommandSpec {
        name,
        arity: 1,
        kind: CommandKind::Primitive,
        handler: Handler::Unary(f),
    }
}

const fn binary(name: &'static str, f: fn(Value, Value) -> CommandResult<Value>) -> CommandSpec {
    CommandSpec {
        name,
        arity: 2,
        kind: CommandKind::Primitive,
        handler: Handler::Binary(f),
    }
}

/// Every command available to scripts.
pub static COMMANDS: &[CommandSpec] = &[
    // Critical actions
    critical("attack", ops::attack),
    critical("move", ops::move_to_free_cell),
    critical("spawn", ops::spawn),
    critical("wait", ops::wait),
    critical("defend", ops::defend),
    // Queries
    query("get_unit_id", ops::get_unit_id),
    query("get_turn_number", ops::get_turn_number),
    query("num_adjacent_allies", ops::num_adjacent_allies),
    query("num_adjacent_enemies", ops::num_adjacent_enemies),
    query("num_free_tiles_around", ops::num_free_tiles_around),
    query("num_total_allies", ops::num_total_allies),
    query("num_total_enemies", ops::num_total_enemies),
    query("distance_from_closest_ally", ops::distance_from_closest_ally),
    query("distance_from_closest_enemy", ops::distance_from_closest_enemy),
    // Primitives
    binary("add", ops::add),
    binary("sub", ops::sub),
    binary("mul", ops::mul),
    binary("div", ops::div),
    binary("eq", ops::eq),
    binary("gt", ops::gt),
    binary("gqt", ops::gqt),
    binary("lt", ops::lt),
    binary("lqt", ops::lqt),
    unary("neg", ops::neg),
    unary("print", ops::print),
    // Control and binding
    CommandSpec {
        name: "if_else",
        arity: 3,
        kind: CommandKind::Control,
        handler: Handler::IfElse,
    },
    CommandSpec {
        name: "define",
        arity: 2,
        kind: CommandKind::Binding,
        handler: Handler::Define,
    },
];

/// Find a command by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Check that `name` is a script command taking exactly `argc` operands.
///
/// This is pure: it never touches game state.
///
/// # Errors
///
/// [`CommandError::Reserved`] for administrative names,
/// [`CommandError::UnknownCommand`] for anything outside the table and
/// [`CommandError::ArityMismatch`] for a wrong operand count.
pub fn verify(name: &str, argc: usize) -> CommandResult<&'static CommandSpec> {
    if RESERVED.contains(&name) {
        return Err(CommandError::Reserved(name.to_string()));
    }
    let spec = lookup(name).ok_or_else(|| CommandError::UnknownCommand(name.to_string()))?;
    if argc != spec.arity {
        return Err(CommandError::ArityMismatch {
            name: spec.name,
            expected: spec.arity,
            got: argc,
        });
    }
    Ok(spec)
}
