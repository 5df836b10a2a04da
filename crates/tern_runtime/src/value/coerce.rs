//! Value coercion.
//!
//! `as_type` tries the built-in conversions first and falls back to the
//! host's `MemberCast_<From>_<To>` functions when none applies.

use std::rc::Rc;

use tern_outcome::Outcome;

use super::{Number, TypedValue};
use crate::context::ContextRef;
use crate::options::ContextOptions;
use crate::types::TypeInfo;

impl TypedValue {
    /// Convert a fixed value with the built-in rules only.
    ///
    /// `Empty` means no built-in rule applies. A value always converts to a
    /// type in its own hierarchy unchanged.
    pub fn coerce_native(&self, options: &ContextOptions, target: &TypeInfo) -> Outcome<TypedValue> {
        let target_name = target.name();
        if self.type_info().is(target_name) {
            return Outcome::Success(self.clone());
        }

        let converted = match self {
            TypedValue::Null if options.null_type_coercible => sentinel("null", target_name),
            TypedValue::Undefined if options.undefined_type_coercible => {
                sentinel("undefined", target_name)
            }
            TypedValue::Null | TypedValue::Undefined => None,
            TypedValue::Int(n) => from_int(*n, target_name),
            TypedValue::Double(d) => from_double(*d, target_name),
            TypedValue::Char(c) => from_char(*c, target_name),
            TypedValue::String(s) => from_string(s, target_name),
            TypedValue::Boolean(b) => from_boolean(*b, target_name),
            TypedValue::Array(array) => {
                (target_name == TypeInfo::STRING).then(|| TypedValue::string(array.to_string()))
            }
            TypedValue::Reference(_)
            | TypedValue::Property(_)
            | TypedValue::Call(_)
            | TypedValue::Expression(_) => None,
        };
        Outcome::from_option(converted)
    }

    /// Convert to `target`, evaluating first if needed.
    ///
    /// Non-coercible `Null` and `Undefined` yield `Empty` without consulting
    /// casting operators.
    pub async fn as_type(&self, context: &ContextRef, target: &TypeInfo) -> Outcome<TypedValue> {
        let value = match self.resolve(context).await {
            Outcome::Success(value) => value,
            other => return other,
        };
        match value.coerce_native(context.options(), target) {
            Outcome::Empty if is_blocked_sentinel(&value, context.options()) => Outcome::Empty,
            Outcome::Empty => context.invoke_casting_operator(&value, target).await,
            decided => decided,
        }
    }

    pub async fn as_string(&self, context: &ContextRef) -> Outcome<Rc<str>> {
        self.as_type(context, &TypeInfo::string())
            .await
            .flat_map(|value| match value {
                TypedValue::String(s) => Outcome::Success(s),
                _ => Outcome::Empty,
            })
    }

    pub async fn as_number(&self, context: &ContextRef) -> Outcome<Number> {
        self.as_type(context, &TypeInfo::number())
            .await
            .flat_map(|value| Outcome::from_option(Number::from_value(&value)))
    }

    pub async fn as_boolean(&self, context: &ContextRef) -> Outcome<bool> {
        self.as_type(context, &TypeInfo::boolean())
            .await
            .flat_map(|value| match value {
                TypedValue::Boolean(b) => Outcome::Success(b),
                _ => Outcome::Empty,
            })
    }
}

fn is_blocked_sentinel(value: &TypedValue, options: &ContextOptions) -> bool {
    match value {
        TypedValue::Null => !options.null_type_coercible,
        TypedValue::Undefined => !options.undefined_type_coercible,
        _ => false,
    }
}

fn sentinel(text: &str, target: &str) -> Option<TypedValue> {
    match target {
        TypeInfo::STRING => Some(TypedValue::string(text)),
        TypeInfo::INT | TypeInfo::NUMBER => Some(TypedValue::Int(0)),
        TypeInfo::DOUBLE => Some(TypedValue::Double(0.0)),
        TypeInfo::BOOLEAN => Some(TypedValue::Boolean(false)),
        _ => None,
    }
}

#[allow(
    clippy::cast_precision_loss,
    reason = "numeric promotion follows float semantics"
)]
fn from_int(n: i64, target: &str) -> Option<TypedValue> {
    match target {
        TypeInfo::DOUBLE => Some(TypedValue::Double(n as f64)),
        TypeInfo::STRING => Some(TypedValue::string(n.to_string())),
        TypeInfo::BOOLEAN => Some(TypedValue::Boolean(n != 0)),
        TypeInfo::CHAR => u32::try_from(n)
            .ok()
            .and_then(char::from_u32)
            .map(TypedValue::Char),
        _ => None,
    }
}

fn from_double(d: f64, target: &str) -> Option<TypedValue> {
    match target {
        TypeInfo::INT => truncate(d).map(TypedValue::Int),
        TypeInfo::STRING => Some(TypedValue::string(d.to_string())),
        TypeInfo::BOOLEAN => Some(TypedValue::Boolean(d != 0.0)),
        TypeInfo::CHAR => truncate(d).and_then(|n| from_int(n, target)),
        _ => None,
    }
}

fn from_char(c: char, target: &str) -> Option<TypedValue> {
    let code = i64::from(u32::from(c));
    match target {
        TypeInfo::INT | TypeInfo::NUMBER => Some(TypedValue::Int(code)),
        TypeInfo::DOUBLE => Some(TypedValue::Double(f64::from(u32::from(c)))),
        TypeInfo::STRING => Some(TypedValue::string(c.to_string())),
        _ => None,
    }
}

fn from_string(s: &str, target: &str) -> Option<TypedValue> {
    let trimmed = s.trim();
    match target {
        TypeInfo::INT => trimmed.parse().ok().map(TypedValue::Int),
        TypeInfo::DOUBLE => trimmed.parse().ok().map(TypedValue::Double),
        TypeInfo::NUMBER => trimmed
            .parse()
            .map(TypedValue::Int)
            .or_else(|_| trimmed.parse().map(TypedValue::Double))
            .ok(),
        TypeInfo::BOOLEAN => match trimmed {
            "true" => Some(TypedValue::Boolean(true)),
            "false" => Some(TypedValue::Boolean(false)),
            _ => None,
        },
        TypeInfo::CHAR => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(TypedValue::Char(c)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn from_boolean(b: bool, target: &str) -> Option<TypedValue> {
    match target {
        TypeInfo::INT | TypeInfo::NUMBER => Some(TypedValue::Int(i64::from(b))),
        TypeInfo::DOUBLE => Some(TypedValue::Double(if b { 1.0 } else { 0.0 })),
        TypeInfo::STRING => Some(TypedValue::string(if b { "true" } else { "false" })),
        _ => None,
    }
}

/// Truncate toward zero when the result fits in `i64`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    reason = "range is checked before the cast"
)]
fn truncate(d: f64) -> Option<i64> {
    let truncated = d.trunc();
    (truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64)
        .then(|| truncated as i64)
}
