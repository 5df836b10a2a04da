//! Runtime values.
//!
//! A [`TypedValue`] is either a fixed value (a scalar, `Null`, `Undefined`,
//! or a fully evaluated array) or a lazy value that only produces a result
//! against a [`ContextRef`]: a variable reference, a property read, a
//! function call or an operator chain.
//!
//! # Evaluation
//!
//! Every value reports an [`EvaluationKind`]. Fixed values are their own
//! evaluation result. Runtime values always need evaluating. Unsure values
//! (arrays mixing fixed and lazy elements) decide per element.
//!
//! [`TypedValue::resolve`] is the entry point callers use: it evaluates only
//! when [`TypedValue::needs_evaluation`] says so.

mod array;
mod coerce;
mod convert;
mod lazy;
mod number;

use std::fmt;
use std::rc::Rc;

use tern_outcome::Outcome;

use crate::context::ContextRef;
use crate::expression::Expression;
use crate::function::Argument;
use crate::types::TypeInfo;
use crate::LocalBoxFuture;

pub use array::{ArrayValue, Stability};
pub use convert::{FromValue, IntoValue};
pub use lazy::{FunctionCall, PropertyReference, VariableReference};
pub use number::Number;

/// How much work a value needs before it can be used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EvaluationKind {
    /// Never needs evaluation.
    Fixed,
    /// Needs evaluation only if some part of it does.
    Unsure,
    /// Always needs evaluation.
    Runtime,
}

/// A tagged runtime value.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    // Fixed scalars
    /// 64-bit signed integer.
    Int(i64),
    /// Double-precision float.
    Double(f64),
    /// Unicode scalar value.
    Char(char),
    /// Immutable string.
    String(Rc<str>),
    /// Boolean.
    Boolean(bool),

    // Collections
    /// Ordered collection; its stability decides whether it needs evaluation.
    Array(ArrayValue),

    // Sentinels
    /// Explicit absence of a value.
    Null,
    /// Result of a failed operator application or a procedure call.
    Undefined,

    // Lazy values
    /// Reads a variable from the evaluating context.
    Reference(VariableReference),
    /// Reads a property through the member protocol.
    Property(Rc<PropertyReference>),
    /// Invokes a function, optionally on a receiver.
    Call(Rc<FunctionCall>),
    /// Reduces a binary operator chain.
    Expression(Rc<Expression>),
}

// Factory methods

impl TypedValue {
    #[inline]
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        TypedValue::String(s.into())
    }

    /// An array classified by its elements.
    #[inline]
    pub fn array(items: Vec<TypedValue>) -> Self {
        TypedValue::Array(ArrayValue::new(items))
    }

    #[inline]
    pub fn reference(name: impl Into<Rc<str>>) -> Self {
        TypedValue::Reference(VariableReference::new(name))
    }

    /// `receiver.name`
    pub fn property(receiver: TypedValue, name: impl Into<Rc<str>>) -> Self {
        TypedValue::Property(Rc::new(PropertyReference::new(receiver, name)))
    }

    /// `name(arguments...)`
    pub fn call(name: impl Into<Rc<str>>, arguments: Vec<Argument>) -> Self {
        TypedValue::Call(Rc::new(FunctionCall::new(name, arguments)))
    }

    /// `receiver.name(arguments...)`
    pub fn member_call(
        receiver: TypedValue,
        name: impl Into<Rc<str>>,
        arguments: Vec<Argument>,
    ) -> Self {
        TypedValue::Call(Rc::new(FunctionCall::on(receiver, name, arguments)))
    }

    #[inline]
    pub fn expression(expression: Expression) -> Self {
        TypedValue::Expression(Rc::new(expression))
    }
}

// Classification

impl TypedValue {
    /// The value's type hierarchy. Lazy values report `Runtime`.
    pub fn type_info(&self) -> TypeInfo {
        match self {
            TypedValue::Int(_) => TypeInfo::int(),
            TypedValue::Double(_) => TypeInfo::double(),
            TypedValue::Char(_) => TypeInfo::char(),
            TypedValue::String(_) => TypeInfo::string(),
            TypedValue::Boolean(_) => TypeInfo::boolean(),
            TypedValue::Array(_) => TypeInfo::array(),
            TypedValue::Null => TypeInfo::null(),
            TypedValue::Undefined => TypeInfo::undefined(),
            TypedValue::Reference(_)
            | TypedValue::Property(_)
            | TypedValue::Call(_)
            | TypedValue::Expression(_) => TypeInfo::runtime(),
        }
    }

    pub fn evaluation_kind(&self) -> EvaluationKind {
        match self {
            TypedValue::Int(_)
            | TypedValue::Double(_)
            | TypedValue::Char(_)
            | TypedValue::String(_)
            | TypedValue::Boolean(_)
            | TypedValue::Null
            | TypedValue::Undefined => EvaluationKind::Fixed,
            TypedValue::Array(array) => array.stability().evaluation_kind(),
            TypedValue::Reference(_)
            | TypedValue::Property(_)
            | TypedValue::Call(_)
            | TypedValue::Expression(_) => EvaluationKind::Runtime,
        }
    }

    /// Whether [`evaluate`](Self::evaluate) would produce something other
    /// than this value in `context`.
    pub fn needs_evaluation(&self, context: &ContextRef) -> bool {
        match self.evaluation_kind() {
            EvaluationKind::Fixed => false,
            EvaluationKind::Runtime => true,
            EvaluationKind::Unsure => match self {
                TypedValue::Array(array) => array
                    .items()
                    .iter()
                    .any(|item| item.needs_evaluation(context)),
                _ => true,
            },
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, TypedValue::Null)
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, TypedValue::Undefined)
    }
}

// Evaluation

impl TypedValue {
    /// Evaluate against `context`.
    ///
    /// Fixed values return themselves. A variable reference reads through
    /// [`Context::require`](crate::Context::require). A call or property read
    /// that finds no function fails with an undeclared-function error.
    pub fn evaluate<'a>(
        &'a self,
        context: &'a ContextRef,
    ) -> LocalBoxFuture<'a, Outcome<TypedValue>> {
        Box::pin(async move {
            match self {
                TypedValue::Array(array) => array.evaluate(context).await,
                TypedValue::Reference(reference) => reference.evaluate(context),
                TypedValue::Property(property) => property.evaluate(context).await,
                TypedValue::Call(call) => call.evaluate(context).await,
                TypedValue::Expression(expression) => expression.evaluate(context).await,
                fixed => Outcome::Success(fixed.clone()),
            }
        })
    }

    /// Evaluate only if needed, otherwise return a clone.
    pub async fn resolve(&self, context: &ContextRef) -> Outcome<TypedValue> {
        if self.needs_evaluation(context) {
            self.evaluate(context).await
        } else {
            Outcome::Success(self.clone())
        }
    }
}

impl From<i64> for TypedValue {
    fn from(n: i64) -> Self {
        TypedValue::Int(n)
    }
}

impl From<f64> for TypedValue {
    fn from(d: f64) -> Self {
        TypedValue::Double(d)
    }
}

impl From<bool> for TypedValue {
    fn from(b: bool) -> Self {
        TypedValue::Boolean(b)
    }
}

impl From<char> for TypedValue {
    fn from(c: char) -> Self {
        TypedValue::Char(c)
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::String(Rc::from(s))
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Int(n) => write!(f, "{n}"),
            TypedValue::Double(d) => write!(f, "{d}"),
            TypedValue::Char(c) => write!(f, "'{c}'"),
            TypedValue::String(s) => write!(f, "\"{s}\""),
            TypedValue::Boolean(b) => write!(f, "{b}"),
            TypedValue::Array(array) => write!(f, "{array}"),
            TypedValue::Null => f.write_str("null"),
            TypedValue::Undefined => f.write_str("undefined"),
            TypedValue::Reference(reference) => f.write_str(reference.name()),
            TypedValue::Property(property) => write!(f, "{property}"),
            TypedValue::Call(call) => write!(f, "{call}"),
            TypedValue::Expression(expression) => write!(f, "{expression}"),
        }
    }
}

#[cfg(test)]
mod tests;
