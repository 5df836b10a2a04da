//! Centralized failure constructors.
//!
//! Every failure the runtime raises is built here, so messages and codes
//! stay consistent and can be replaced in one location.
//!
//! # Usage
//!
//! ```
//! use tern_outcome::errors::{access_denied, failed_to_set_variable};
//!
//! let failure = failed_to_set_variable("x").caused_by(access_denied("set variable 'x'"));
//! assert_eq!(failure.root_cause().message, "access denied: set variable 'x'");
//! ```

use crate::{ErrorCode, Failure};

// Access

/// A restriction check refused `action`.
pub fn access_denied(action: &str) -> Failure {
    Failure::new(ErrorCode::AccessDenied, format!("access denied: {action}"))
}

// Resolution

pub fn undeclared_variable(name: &str) -> Failure {
    Failure::new(
        ErrorCode::UndeclaredVariable,
        format!("undeclared variable: {name}"),
    )
}

pub fn undeclared_function(name: &str) -> Failure {
    Failure::new(
        ErrorCode::UndeclaredFunction,
        format!("undeclared function: {name}"),
    )
}

// Mutation

pub fn failed_to_set_variable(name: &str) -> Failure {
    Failure::new(
        ErrorCode::FailedToSetVariable,
        format!("failed to set variable: {name}"),
    )
}

pub fn failed_to_register_function(name: &str) -> Failure {
    Failure::new(
        ErrorCode::FailedToRegisterFunction,
        format!("failed to register function: {name}"),
    )
}

// Resource limits

pub fn max_depth_reached(depth: usize, max_depth: usize) -> Failure {
    Failure::new(
        ErrorCode::MaxDepthReached,
        format!("maximum context depth reached: depth {depth} (limit: {max_depth})"),
    )
}

pub fn max_depth_reached_hidden() -> Failure {
    Failure::new(
        ErrorCode::MaxDepthReachedHidden,
        "maximum context depth reached",
    )
}

pub fn max_recursion_reached(function: &str, active: usize, max_recursion: usize) -> Failure {
    Failure::new(
        ErrorCode::MaxRecursionReached,
        format!(
            "maximum recursion reached in {function}: {active} active calls (limit: {max_recursion})"
        ),
    )
}

pub fn max_recursion_reached_hidden(function: &str) -> Failure {
    Failure::new(
        ErrorCode::MaxRecursionReachedHidden,
        format!("maximum recursion reached in {function}"),
    )
}

pub fn call_budget_exhausted(function: &str) -> Failure {
    Failure::new(
        ErrorCode::CallBudgetExhausted,
        format!("call budget exhausted before calling {function}"),
    )
}

// Declaration and invocation

pub fn invalid_parameter_default(parameter: &str, expected: &str, got: &str) -> Failure {
    Failure::new(
        ErrorCode::InvalidParameterDefault,
        format!("default for parameter {parameter} must be {expected}, got {got}"),
    )
}

pub fn invalid_argument(parameter: &str, expected: &str) -> Failure {
    Failure::new(
        ErrorCode::InvalidArgument,
        format!("argument {parameter} cannot be read as {expected}"),
    )
}

pub fn missing_body(function: &str) -> Failure {
    Failure::new(
        ErrorCode::MissingBody,
        format!("function {function} has no body"),
    )
}

// Native

/// Failure raised from inside a native function body.
pub fn native(message: impl Into<String>) -> Failure {
    Failure::new(ErrorCode::Native, message)
}
