//! Validate-then-execute dispatch with per-turn critical gating.

use std::fmt;

use tracing::debug;

use crate::Value;
use crate::command::table::{CommandSpec, Handler, verify};
use crate::error::{CommandError, CommandResult};
use crate::game::{GameState, Rules, UnitId};

/// A suspended computation, forced at most once by the command receiving it.
pub type Thunk<'a> = Box<dyn FnOnce(&mut Engine, &mut GameState) -> CommandResult<Value> + 'a>;

/// A positional command argument.
pub enum Operand<'a> {
    /// An already evaluated value.
    Value(Value),
    /// A bare name: the binding target of `define`, a variable read elsewhere.
    Symbol(&'a str),
    /// A computation evaluated only if the command asks for it.
    Deferred(Thunk<'a>),
}

impl fmt::Debug for Operand<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Symbol(s) => f.debug_tuple("Symbol").field(s).finish(),
            Self::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<Value> for Operand<'_> {
    fn from(v: Value) -> Self {
        Self::Value(v)
    }
}

impl<'a> Operand<'a> {
    /// Wrap a closure as a deferred operand.
    pub fn deferred(
        f: impl FnOnce(&mut Engine, &mut GameState) -> CommandResult<Value> + 'a,
    ) -> Self {
        Self::Deferred(Box::new(f))
    }

    /// Evaluate the operand. Symbols read the acting unit's variables;
    /// an unbound name reads as `Nil`.
    fn force(self, engine: &mut Engine, state: &mut GameState) -> CommandResult<Value> {
        match self {
            Self::Value(v) => Ok(v),
            Self::Symbol(name) => Ok(state.acting_unit()?.var(name).unwrap_or_default()),
            Self::Deferred(thunk) => thunk(engine, state),
        }
    }
}

/// Executes commands for the acting unit.
///
/// Holds the per-turn step counter; call [`Engine::begin_turn`] before each
/// unit's script runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Engine {
    /// Dispatches allowed per turn.
    step_limit: u32,
    /// Dispatches so far this turn.
    steps: u32,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Rules::default().step_limit)
    }
}

impl Engine {
    /// Create an engine allowing `step_limit` dispatches per turn.
    #[must_use]
    pub const fn new(step_limit: u32) -> Self {
        Self {
            step_limit,
            steps: 0,
        }
    }

    /// Create an engine for the given rules.
    #[must_use]
    pub const fn for_rules(rules: &Rules) -> Self {
        Self::new(rules.step_limit)
    }

    /// Reset the step counter.
    pub fn begin_turn(&mut self) {
        self.steps = 0;
    }

    /// Dispatches so far this turn.
    #[must_use]
    pub const fn steps(&self) -> u32 {
        self.steps
    }

    /// Run command `name` with `operands` for the acting unit.
    ///
    /// The name and operand count are verified before anything runs, so a
    /// malformed request never has side effects.
    ///
    /// # Errors
    ///
    /// Validation faults from [`verify`], [`CommandError::StepLimitExceeded`],
    /// [`CommandError::DivisionByZero`], [`CommandError::ExpectedSymbol`] and
    /// board faults raised by critical actions.
    pub fn execute(
        &mut self,
        state: &mut GameState,
        name: &str,
        operands: Vec<Operand<'_>>,
    ) -> CommandResult<Value> {
        let spec = verify(name, operands.len())?;
        self.dispatch(spec, state, operands)
    }

    fn dispatch(
        &mut self,
        spec: &'static CommandSpec,
        state: &mut GameState,
        operands: Vec<Operand<'_>>,
    ) -> CommandResult<Value> {
        if self.steps >= self.step_limit {
            return Err(CommandError::StepLimitExceeded(self.step_limit));
        }
        self.steps += 1;

        let arity = |got| CommandError::ArityMismatch {
            name: spec.name,
            expected: spec.arity,
            got,
        };
        let got = operands.len();

        match spec.handler {
            Handler::Query(f) => {
                let unit = state.acting_unit()?;
                Ok(f(state, unit))
            }
            Handler::Critical(f) => {
                let Some(unit) = claim_critical(state, spec.name)? else {
                    return Ok(Value::Nil);
                };
                f(state, unit)?;
                Ok(Value::Bool(true))
            }
            Handler::Unary(f) => {
                let [a] = <[Operand<'_>; 1]>::try_from(operands).map_err(|_| arity(got))?;
                let a = a.force(self, state)?;
                f(a)
            }
            Handler::Binary(f) => {
                let [a, b] = <[Operand<'_>; 2]>::try_from(operands).map_err(|_| arity(got))?;
                let a = a.force(self, state)?;
                let b = b.force(self, state)?;
                f(a, b)
            }
            Handler::IfElse => {
                let [pred, then, otherwise] =
                    <[Operand<'_>; 3]>::try_from(operands).map_err(|_| arity(got))?;
                let branch = if pred.force(self, state)?.is_truthy() {
                    then
                } else {
                    otherwise
                };
                branch.force(self, state)
            }
            Handler::Define => {
                let [symbol, value] =
                    <[Operand<'_>; 2]>::try_from(operands).map_err(|_| arity(got))?;
                let Operand::Symbol(symbol) = symbol else {
                    return Err(CommandError::ExpectedSymbol(spec.name));
                };
                let value = value.force(self, state)?;
                state.acting_unit_mut()?.define(symbol, value);
                Ok(Value::Bool(true))
            }
        }
    }
}

/// Take the turn's critical slot for the acting unit.
///
/// Returns `None` without error if the slot is already used or the unit
/// cannot act. The flag is set before the action body runs.
fn claim_critical(state: &mut GameState, name: &str) -> CommandResult<Option<UnitId>> {
    let unit = state.acting_unit()?;
    if state.turns.performed_critical_action {
        debug!(unit = unit.id, command = name, "critical action already performed this turn");
        return Ok(None);
    }
    if !unit.can_act() {
        debug!(unit = unit.id, command = name, "unit is unable to act");
        return Ok(None);
    }
    let id = unit.id;
    state.turns.performed_critical_action = true;
    Ok(Some(id))
}
