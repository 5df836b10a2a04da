//! Execution core for the Tern scripting language.
//!
//! This crate provides the pieces an embedding host needs to run Tern code:
//!
//! - [`TypedValue`]: the tagged value universe, with lazily evaluated variants
//! - [`Context`]: a scoped registry of variables and overloaded functions
//! - [`Restriction`]: the capability policy consulted before every operation
//! - [`Function`] and [`Registrar`]: declaring script and native functions
//! - [`Expression`]: tiered left-fold evaluation of binary operator chains
//! - [`Action`] and [`Block`]: the statements a script body is made of
//!
//! All operations report through [`Outcome`], which distinguishes a missing
//! answer (`Empty`) from a refusal (`Failure`).
//!
//! # Example
//!
//! ```
//! use tern_runtime::{Argument, ContextRef, ParamSpec, Registrar, TypedValue};
//! use tern_outcome::Outcome;
//!
//! let global = ContextRef::permissive();
//! let registered = Registrar::new(&global).function1(
//!     "double",
//!     ParamSpec::<i64>::of("n"),
//!     |n| n * 2,
//! );
//! assert!(registered.is_success());
//!
//! let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! let outcome = runtime.block_on(
//!     global.invoke_function("double", &[Argument::positional(TypedValue::Int(21))]),
//! );
//! assert_eq!(outcome, Outcome::Success(TypedValue::Int(42)));
//! ```

mod action;
mod context;
mod dispatch;
mod expression;
mod function;
mod member;
mod options;
mod restriction;
mod types;
mod value;

#[cfg(test)]
mod test_helpers;

use std::future::Future;
use std::pin::Pin;

pub use action::{Action, Block};
pub use context::{sanitize_name, Context, ContextBuilder, ContextKind, ContextRef, ScopeMarker};
pub use expression::{Expression, Operator, Tier};
pub use function::{
    Argument, Arguments, Function, FunctionBody, FunctionBuilder, MissingValue, NativeBody,
    ParamSpec, ParamType, Parameter, Registrar, REST_VARIABLE,
};
pub use member::{MemberKey, MemberKind, LEFT_OPERAND, RIGHT_OPERAND, SELF_ARGUMENT};
pub use options::{ContextOptions, RecursionLimits};
pub use restriction::{
    CallBudget, CompoundRestriction, EmptyResultFinisher, FunctionDenyList, Grant,
    PermissiveRestriction, RecursionLimiter, Restriction, StartingValue,
};
pub use tern_outcome::{errors, ErrorCode, Failure, Outcome};
pub use types::{TypeInfo, TypeName};
pub use value::{
    ArrayValue, EvaluationKind, FromValue, FunctionCall, IntoValue, Number, PropertyReference,
    Stability, TypedValue, VariableReference,
};

/// A boxed, non-`Send` future.
///
/// Contexts are `Rc`-based and single-threaded, so every future the runtime
/// produces is local to the thread that created it.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;
