//! Error types for the board, the command engine and the script translator.
//!
//! Only hard faults live here. Soft game conditions (unit cap reached, no
//! free cell, no adjacent enemy, critical slot already used) are not errors:
//! they resolve to a no-op and are only visible in the logs.

use thiserror::Error;

use crate::game::{Coord, PlayerId, UnitId};

/// Faults raised by the spatial model.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum BoardError {
    /// A unit was spawned or moved onto an occupied cell.
    #[error("cell {coord} is already occupied by unit {occupant}")]
    Conflict {
        /// The requested cell.
        coord: Coord,
        /// The unit already standing there.
        occupant: UnitId,
    },
    /// The unit limit percentage is outside `(0, 1]`.
    #[error("unit limit must be greater than 0 and at most 1 of board capacity, got {0}")]
    InvalidUnitLimit(f64),
    /// The board is too small for eight distinct neighbours per cell.
    #[error("board must be at least 3x3, got {width}x{height}")]
    TooSmall {
        /// Requested width.
        width: u16,
        /// Requested height.
        height: u16,
    },
    /// A spawn was requested for a player the board does not know.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),
    /// An operation referenced a unit that is not on the board.
    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),
}

/// Faults raised while validating or executing a command.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    /// The name is not in the command table.
    #[error("unknown command {0}()")]
    UnknownCommand(String),
    /// The name is an administrative entry point scripts may not call.
    #[error("command {0}() is unavailable to scripts")]
    Reserved(String),
    /// Wrong number of operands.
    #[error("invalid number of arguments to {name}(): expected {expected}, got {got}")]
    ArityMismatch {
        /// Command name.
        name: &'static str,
        /// Declared arity.
        expected: usize,
        /// Supplied operand count.
        got: usize,
    },
    /// A binding command was given something other than a symbol to bind.
    #[error("{0}() expects a symbol as its first argument")]
    ExpectedSymbol(&'static str),
    /// `div` with a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
    /// The per-turn instruction ceiling was hit.
    #[error("step limit of {0} commands per turn exceeded")]
    StepLimitExceeded(u32),
    /// A unit-scoped command ran while no unit was acting.
    #[error("no unit is acting this turn")]
    NoActingUnit,
    /// A critical action tripped a board fault.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Faults raised while loading a script.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScriptError {
    /// Malformed source text.
    #[error("parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
    /// The script names a command that does not validate.
    #[error(transparent)]
    Command(#[from] CommandError),
    /// Malformed JSON expression tree.
    #[error("invalid script json: {0}")]
    Json(String),
    /// The script file could not be read.
    #[error("cannot read script {path}: {message}")]
    Io {
        /// Path that was being read.
        path: String,
        /// Underlying I/O error.
        message: String,
    },
}

/// Result type for board operations.
pub type BoardResult<T> = Result<T, BoardError>;

/// Result type for command execution.
pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_display() {
        let err = BoardError::Conflict {
            coord: Coord::new(3, 4),
            occupant: 7,
        };
        assert_eq!(err.to_string(), "cell (3, 4) is already occupied by unit 7");
    }

    #[test]
    fn test_arity_display() {
        let err = CommandError::ArityMismatch {
            name: "add",
            expected: 2,
            got: 3,
        };
        assert!(err.to_string().contains("expected 2, got 3"));
    }

    #[test]
    fn test_board_error_converts() {
        let err: CommandError = BoardError::UnknownUnit(3).into();
        assert_eq!(err, CommandError::Board(BoardError::UnknownUnit(3)));
    }
}
