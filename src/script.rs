//! Unit scripts.
//!
//! A script is a list of s-expressions run top to bottom once per turn of
//! every unit its player owns. Scripts are validated against the command
//! table when loaded, so a script that loads never names an unknown command
//! or passes the wrong number of operands.

mod eval;
mod expr;
mod parser;

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;

use serde::Serialize;

pub use expr::Expr;
pub use parser::{MAX_DEPTH, parse};

use crate::Value;
use crate::command::Engine;
use crate::error::{CommandResult, ScriptError};
use crate::game::GameState;

/// A validated script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Script {
    exprs: Vec<Expr>,
}

impl Script {
    /// Parse and validate s-expression source.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Parse`] for malformed text, [`ScriptError::Command`] for
    /// calls that do not validate.
    pub fn parse(src: &str) -> Result<Self, ScriptError> {
        Self::new(parse(src)?)
    }

    /// Load and validate a JSON expression list.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Json`] or [`ScriptError::Command`].
    pub fn from_json(src: &str) -> Result<Self, ScriptError> {
        let exprs: Vec<Expr> =
            serde_json::from_str(src).map_err(|e| ScriptError::Json(e.to_string()))?;
        Self::new(exprs)
    }

    /// Read a script file. `.json` files hold an expression list, anything
    /// else is s-expression source.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Io`] if the file cannot be read, otherwise as
    /// [`Script::parse`] or [`Script::from_json`].
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let src = std::fs::read_to_string(path).map_err(|e| ScriptError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json(&src)
        } else {
            Self::parse(&src)
        }
    }

    /// Validate an expression list.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Command`] for the first call that does not validate.
    pub fn new(exprs: Vec<Expr>) -> Result<Self, ScriptError> {
        for expr in &exprs {
            expr.validate()?;
        }
        Ok(Self { exprs })
    }

    /// Top-level expressions.
    #[must_use]
    pub fn exprs(&self) -> &[Expr] {
        &self.exprs
    }

    /// Distinct command names the script calls.
    #[must_use]
    pub fn commands_used(&self) -> BTreeSet<&str> {
        let mut names = BTreeSet::new();
        for expr in &self.exprs {
            expr.visit_calls(&mut |name| {
                names.insert(name);
            });
        }
        names
    }

    /// Serialize as a JSON expression list.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ScriptError> {
        serde_json::to_string_pretty(self).map_err(|e| ScriptError::Json(e.to_string()))
    }

    /// Run one turn for the acting unit and return the value of the last
    /// top-level expression.
    ///
    /// Resets the engine's step counter first. A fault aborts the rest of the
    /// turn; effects that already happened stay.
    ///
    /// # Errors
    ///
    /// Any [`crate::error::CommandError`] raised while evaluating.
    pub fn run_turn(&self, engine: &mut Engine, state: &mut GameState) -> CommandResult<Value> {
        engine.begin_turn();
        let mut last = Value::Nil;
        for expr in &self.exprs {
            last = eval::eval(expr, engine, state)?;
        }
        Ok(last)
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::game::{Board, Coord, Rules};

    fn setup() -> (Engine, GameState) {
        let mut board = Board::new(10, 10, 0.5, 9).unwrap();
        board.add_player(1);
        board.add_player(2);
        let mut state = GameState::new(board, Rules::default());
        state.spawn(1, Coord::new(1, 1)).unwrap();
        state.spawn(2, Coord::new(2, 1)).unwrap();
        state.start_turn().unwrap();
        (Engine::for_rules(&state.rules), state)
    }

    #[test]
    fn test_parse_validates() {
        assert!(matches!(
            Script::parse("(attack 1)"),
            Err(ScriptError::Command(CommandError::ArityMismatch { .. }))
        ));
        assert!(matches!(
            Script::parse("(execute)"),
            Err(ScriptError::Command(CommandError::Reserved(_)))
        ));
        assert!(matches!(
            Script::parse("(define 3 4)"),
            Err(ScriptError::Command(CommandError::ExpectedSymbol("define")))
        ));
    }

    #[test]
    fn test_commands_used() {
        let script =
            Script::parse("(if_else (gt (num_adjacent_enemies) 0) (attack) (move))\n(attack)")
                .unwrap();
        let used: Vec<_> = script.commands_used().into_iter().collect();
        assert_eq!(used, vec!["attack", "gt", "if_else", "move", "num_adjacent_enemies"]);
    }

    #[test]
    fn test_json_matches_text() {
        let text = Script::parse("(define x (add 1 2)) (print x)").unwrap();
        let json = text.to_json().unwrap();
        assert_eq!(Script::from_json(&json).unwrap(), text);
        assert!(matches!(Script::from_json("{"), Err(ScriptError::Json(_))));
    }

    #[test]
    fn test_run_turn_attacks_adjacent_enemy() {
        let (mut engine, mut state) = setup();
        let script =
            Script::parse("(if_else (gt (num_adjacent_enemies) 0) (attack) (move))").unwrap();
        assert_eq!(script.run_turn(&mut engine, &mut state), Ok(Value::Bool(true)));
        assert_eq!(state.board.unit(2).unwrap().health(), 1);
        assert_eq!(state.acting_unit().unwrap().location(), Coord::new(1, 1));
    }

    #[test]
    fn test_untaken_branch_has_no_effect() {
        let (mut engine, mut state) = setup();
        let script = Script::parse("(if_else false (attack) (get_unit_id))").unwrap();
        assert_eq!(script.run_turn(&mut engine, &mut state), Ok(Value::Int(1)));
        assert!(!state.turns.performed_critical_action);
        assert_eq!(state.board.unit(2).unwrap().health(), 2);
    }

    #[test]
    fn test_variables_persist_across_turns() {
        let (mut engine, mut state) = setup();
        let script = Script::parse("(define n (add n 1)) n").unwrap();
        assert_eq!(script.run_turn(&mut engine, &mut state), Ok(Value::Int(1)));
        state.end_turn();
        state.start_turn().unwrap();
        state.end_turn();
        state.start_turn().unwrap();
        assert_eq!(state.current_unit(), Some(1));
        assert_eq!(script.run_turn(&mut engine, &mut state), Ok(Value::Int(2)));
    }

    #[test]
    fn test_fault_stops_turn() {
        let (mut engine, mut state) = setup();
        let script = Script::parse("(define a 1) (div 5 0) (define b 1)").unwrap();
        assert_eq!(
            script.run_turn(&mut engine, &mut state),
            Err(CommandError::DivisionByZero)
        );
        let unit = state.acting_unit().unwrap();
        assert_eq!(unit.var("a"), Some(Value::Int(1)));
        assert_eq!(unit.var("b"), None);
        assert!(!state.turns.performed_critical_action);
    }

    #[test]
    fn test_step_limit_resets_per_turn() {
        let (_, mut state) = setup();
        let mut engine = Engine::new(3);
        let script = Script::parse("(add (add 1 2) 3)").unwrap();
        assert!(script.run_turn(&mut engine, &mut state).is_ok());
        assert!(script.run_turn(&mut engine, &mut state).is_ok());
        let long = Script::parse("(add (add (add (add 1 2) 3) 4) 5)").unwrap();
        assert_eq!(
            long.run_turn(&mut engine, &mut state),
            Err(CommandError::StepLimitExceeded(3))
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.scm");
        std::fs::write(&path, "(wait)").unwrap();
        assert_eq!(Script::load(&path).unwrap().exprs().len(), 1);
        assert!(matches!(
            Script::load(&dir.path().join("missing.scm")),
            Err(ScriptError::Io { .. })
        ));
    }
}
