use std::fmt;

use super::TypedValue;

/// A numeric view of a value: integral or floating.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i64),
    Double(f64),
}

impl Number {
    #[allow(
        clippy::cast_precision_loss,
        reason = "numeric promotion follows float semantics"
    )]
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Double(d) => d,
        }
    }

    /// The integral view, if there is one without truncation.
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(n),
            Number::Double(_) => None,
        }
    }

    pub fn is_integral(self) -> bool {
        matches!(self, Number::Int(_))
    }

    pub fn into_value(self) -> TypedValue {
        match self {
            Number::Int(n) => TypedValue::Int(n),
            Number::Double(d) => TypedValue::Double(d),
        }
    }

    /// Read a fixed numeric value. Other variants yield `None`.
    pub fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Int(n) => Some(Number::Int(*n)),
            TypedValue::Double(d) => Some(Number::Double(*d)),
            _ => None,
        }
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::Int(n)
    }
}

impl From<f64> for Number {
    fn from(d: f64) -> Self {
        Number::Double(d)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{n}"),
            Number::Double(d) => write!(f, "{d}"),
        }
    }
}
