//! Runtime values produced and consumed by script commands.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A script value.
///
/// `Nil` is what a command returns when it has nothing to report, most
/// notably a critical action that was skipped. Arithmetic treats `Nil` as 0
/// and booleans as 0/1; predicates treat any non-zero value as true. `eq`
/// is the exception: `Nil` is only equal to `Nil`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// No result.
    #[default]
    Nil,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
}

impl Value {
    /// Numeric view of the value.
    #[must_use]
    pub const fn as_int(self) -> i64 {
        match self {
            Self::Nil | Self::Bool(false) => 0,
            Self::Bool(true) => 1,
            Self::Int(n) => n,
        }
    }

    /// Truthiness of the value.
    #[must_use]
    pub const fn is_truthy(self) -> bool {
        self.as_int() != 0
    }

    /// Check for `Nil`.
    #[must_use]
    pub const fn is_nil(self) -> bool {
        matches!(self, Self::Nil)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<u16> for Value {
    fn from(n: u16) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => write!(f, "nil"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coercion() {
        assert_eq!(Value::Nil.as_int(), 0);
        assert_eq!(Value::Bool(true).as_int(), 1);
        assert_eq!(Value::Int(-4).as_int(), -4);
        assert!(Value::Int(-4).is_truthy());
        assert!(!Value::Nil.is_truthy());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "nil");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(12).to_string(), "12");
    }

    #[test]
    fn test_json_untagged() {
        let v: Value = serde_json::from_str("5").unwrap();
        assert_eq!(v, Value::Int(5));
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Bool(true));
        let v: Value = serde_json::from_str("null").unwrap();
        assert_eq!(v, Value::Nil);
    }
}
