//! Runtime values.

use std::fmt;

use bigdecimal::{BigDecimal, Zero};

/// A value produced by evaluation.
///
/// The engine's value domain is arbitrary-precision decimals and strings;
/// logical functions encode their results as the decimals `1` and `0`.
/// The `Bool` variant exists so host-supplied resolvers can hand back
/// native booleans; truthiness conversion accepts all three variants.
#[derive(Clone, PartialEq, Debug)]
pub enum Value {
    Number(BigDecimal),
    Str(String),
    Bool(bool),
}

impl Value {
    /// Decimal `1` or `0` for a boolean result, as the logical and
    /// comparison functions return it.
    pub fn truth(b: bool) -> Self {
        if b {
            Value::Number(BigDecimal::from(1))
        } else {
            Value::Number(BigDecimal::from(0))
        }
    }

    /// Truthiness: nonzero number, non-empty string, or the bool itself.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => !n.is_zero(),
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }

    pub fn as_number(&self) -> Option<&BigDecimal> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Type name used in parameter-type error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<BigDecimal> for Value {
    fn from(value: BigDecimal) -> Self {
        Value::Number(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(BigDecimal::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::str::FromStr;

    #[test]
    fn truthiness() {
        assert!(Value::from(10).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
    }

    #[test]
    fn display_is_plain() {
        assert_eq!(Value::from(-1).to_string(), "-1");
        assert_eq!(
            Value::Number(BigDecimal::from_str("3.90").unwrap()).to_string(),
            "3.90"
        );
        assert_eq!(Value::from("foo").to_string(), "foo");
        assert_eq!(Value::Bool(true).to_string(), "true");
    }

    #[test]
    fn numeric_equality_is_scale_insensitive() {
        assert_eq!(
            Value::Number(BigDecimal::from_str("5.0").unwrap()),
            Value::from(5)
        );
    }
}
