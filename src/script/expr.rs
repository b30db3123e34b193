//! Expression trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Value;
use crate::command::{CommandKind, verify};
use crate::error::{CommandError, CommandResult};

/// A script expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// A constant.
    Literal(Value),
    /// A bare name. Reads a variable, or names the binding target of `define`.
    Symbol(String),
    /// A command invocation.
    Call {
        /// Command name.
        name: String,
        /// Operands, left to right.
        #[serde(default)]
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Build a call node.
    pub fn call(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Call {
            name: name.into(),
            args,
        }
    }

    /// Check every call in the tree against the command table.
    ///
    /// # Errors
    ///
    /// The first [`CommandError`] found in depth-first order.
    pub fn validate(&self) -> CommandResult<()> {
        let Self::Call { name, args } = self else {
            return Ok(());
        };
        let spec = verify(name, args.len())?;
        if spec.kind == CommandKind::Binding && !matches!(args.first(), Some(Self::Symbol(_))) {
            return Err(CommandError::ExpectedSymbol(spec.name));
        }
        args.iter().try_for_each(Self::validate)
    }

    /// Call every `f` on each command name in the tree.
    pub(super) fn visit_calls<'a>(&'a self, f: &mut impl FnMut(&'a str)) {
        if let Self::Call { name, args } = self {
            f(name);
            for arg in args {
                arg.visit_calls(f);
            }
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "{v}"),
            Self::Symbol(s) => f.write_str(s),
            Self::Call { name, args } => {
                write!(f, "({name}")?;
                for arg in args {
                    write!(f, " {arg}")?;
                }
                f.write_str(")")
            }
        }
    }
}
