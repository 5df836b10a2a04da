//! Conversions between Rust types and [`TypedValue`] for native functions.

use std::rc::Rc;

use super::{ArrayValue, Number, TypedValue};
use crate::types::TypeInfo;

/// A Rust type a native function can receive as an argument.
///
/// `type_info` is the declared parameter type; `from_value` reads an
/// argument that already passed that type check.
pub trait FromValue: Sized {
    fn type_info() -> TypeInfo;

    fn from_value(value: &TypedValue) -> Option<Self>;
}

/// A Rust type a native function can return.
pub trait IntoValue {
    fn into_value(self) -> TypedValue;
}

impl FromValue for i64 {
    fn type_info() -> TypeInfo {
        TypeInfo::int()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// Accepts any `Number`, promoting integers.
impl FromValue for f64 {
    fn type_info() -> TypeInfo {
        TypeInfo::number()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        Number::from_value(value).map(Number::as_f64)
    }
}

impl FromValue for Number {
    fn type_info() -> TypeInfo {
        TypeInfo::number()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        Number::from_value(value)
    }
}

impl FromValue for bool {
    fn type_info() -> TypeInfo {
        TypeInfo::boolean()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for char {
    fn type_info() -> TypeInfo {
        TypeInfo::char()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Char(c) => Some(*c),
            _ => None,
        }
    }
}

impl FromValue for Rc<str> {
    fn type_info() -> TypeInfo {
        TypeInfo::string()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::String(s) => Some(Rc::clone(s)),
            _ => None,
        }
    }
}

impl FromValue for String {
    fn type_info() -> TypeInfo {
        TypeInfo::string()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::String(s) => Some(s.to_string()),
            _ => None,
        }
    }
}

impl FromValue for ArrayValue {
    fn type_info() -> TypeInfo {
        TypeInfo::array()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        match value {
            TypedValue::Array(array) => Some(array.clone()),
            _ => None,
        }
    }
}

/// Any value, unconverted.
impl FromValue for TypedValue {
    fn type_info() -> TypeInfo {
        TypeInfo::object()
    }

    fn from_value(value: &TypedValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl IntoValue for TypedValue {
    fn into_value(self) -> TypedValue {
        self
    }
}

/// Procedures return `Undefined`.
impl IntoValue for () {
    fn into_value(self) -> TypedValue {
        TypedValue::Undefined
    }
}

impl IntoValue for i64 {
    fn into_value(self) -> TypedValue {
        TypedValue::Int(self)
    }
}

impl IntoValue for f64 {
    fn into_value(self) -> TypedValue {
        TypedValue::Double(self)
    }
}

impl IntoValue for Number {
    fn into_value(self) -> TypedValue {
        Number::into_value(self)
    }
}

impl IntoValue for bool {
    fn into_value(self) -> TypedValue {
        TypedValue::Boolean(self)
    }
}

impl IntoValue for char {
    fn into_value(self) -> TypedValue {
        TypedValue::Char(self)
    }
}

impl IntoValue for String {
    fn into_value(self) -> TypedValue {
        TypedValue::string(self)
    }
}

impl IntoValue for &str {
    fn into_value(self) -> TypedValue {
        TypedValue::string(self)
    }
}

impl IntoValue for Rc<str> {
    fn into_value(self) -> TypedValue {
        TypedValue::String(self)
    }
}

impl IntoValue for ArrayValue {
    fn into_value(self) -> TypedValue {
        TypedValue::Array(self)
    }
}

impl IntoValue for Vec<TypedValue> {
    fn into_value(self) -> TypedValue {
        TypedValue::array(self)
    }
}

/// `None` becomes `Null`.
impl<T: IntoValue> IntoValue for Option<T> {
    fn into_value(self) -> TypedValue {
        self.map_or(TypedValue::Null, IntoValue::into_value)
    }
}
