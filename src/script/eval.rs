//! Tree-walking evaluation on top of the command engine.

use crate::Value;
use crate::command::{CommandKind, Engine, Operand, verify};
use crate::error::CommandResult;
use crate::game::GameState;
use crate::script::Expr;

/// Evaluate `expr` for the acting unit.
///
/// Operands are evaluated left to right before the call, except the two
/// branches of a control command, which are handed over unevaluated.
pub(super) fn eval(expr: &Expr, engine: &mut Engine, state: &mut GameState) -> CommandResult<Value> {
    match expr {
        Expr::Literal(v) => Ok(*v),
        Expr::Symbol(name) => Ok(state.acting_unit()?.var(name).unwrap_or_default()),
        Expr::Call { name, args } => {
            let spec = verify(name, args.len())?;
            let mut operands = Vec::with_capacity(args.len());
            for (i, arg) in args.iter().enumerate() {
                let operand = match arg {
                    Expr::Literal(v) => Operand::Value(*v),
                    Expr::Symbol(s) => Operand::Symbol(s.as_str()),
                    Expr::Call { .. } if spec.kind == CommandKind::Control && i > 0 => {
                        Operand::deferred(move |e, s| eval(arg, e, s))
                    }
                    Expr::Call { .. } => Operand::Value(eval(arg, engine, state)?),
                };
                operands.push(operand);
            }
            engine.execute(state, spec.name, operands)
        }
    }
}
