//! Shared fixtures for unit tests.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::context::ContextRef;
use crate::expression::Operator;
use crate::function::{Argument, ParamSpec, Registrar};
use crate::member::MemberKey;
use crate::value::{Number, TypedValue};

/// Install a test subscriber; repeated calls are no-ops.
///
/// Filter with `RUST_LOG` (defaults to `debug`).
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A permissive global context with arithmetic, comparison, equality,
/// bitwise and logical operators registered.
pub fn context_with_operators() -> ContextRef {
    init_test_logging();
    let global = ContextRef::permissive();
    register_operators(&global);
    global
}

fn operator_name(type_name: &str, operator: Operator) -> String {
    MemberKey::operator(type_name, operator.symbol()).to_string()
}

fn arithmetic(operator: Operator, a: Number, b: Number) -> TypedValue {
    match (operator, a, b) {
        (Operator::Add, Number::Int(a), Number::Int(b)) => {
            a.checked_add(b).map_or(TypedValue::Undefined, TypedValue::Int)
        }
        (Operator::Subtract, Number::Int(a), Number::Int(b)) => {
            a.checked_sub(b).map_or(TypedValue::Undefined, TypedValue::Int)
        }
        (Operator::Multiply, Number::Int(a), Number::Int(b)) => {
            a.checked_mul(b).map_or(TypedValue::Undefined, TypedValue::Int)
        }
        (Operator::Divide, Number::Int(a), Number::Int(b)) => {
            a.checked_div(b).map_or(TypedValue::Undefined, TypedValue::Int)
        }
        (Operator::Modulo, Number::Int(a), Number::Int(b)) => {
            a.checked_rem(b).map_or(TypedValue::Undefined, TypedValue::Int)
        }
        (Operator::Power, Number::Int(a), Number::Int(b)) => u32::try_from(b)
            .ok()
            .and_then(|b| a.checked_pow(b))
            .map_or(TypedValue::Undefined, TypedValue::Int),
        (Operator::Add, a, b) => TypedValue::Double(a.as_f64() + b.as_f64()),
        (Operator::Subtract, a, b) => TypedValue::Double(a.as_f64() - b.as_f64()),
        (Operator::Multiply, a, b) => TypedValue::Double(a.as_f64() * b.as_f64()),
        (Operator::Divide, a, b) => TypedValue::Double(a.as_f64() / b.as_f64()),
        (Operator::Modulo, a, b) => TypedValue::Double(a.as_f64() % b.as_f64()),
        (Operator::Power, a, b) => TypedValue::Double(a.as_f64().powf(b.as_f64())),
        (Operator::Less, a, b) => TypedValue::Boolean(a.as_f64() < b.as_f64()),
        (Operator::LessEqual, a, b) => TypedValue::Boolean(a.as_f64() <= b.as_f64()),
        (Operator::Greater, a, b) => TypedValue::Boolean(a.as_f64() > b.as_f64()),
        (Operator::GreaterEqual, a, b) => TypedValue::Boolean(a.as_f64() >= b.as_f64()),
        _ => TypedValue::Undefined,
    }
}

pub fn register_operators(context: &ContextRef) {
    let registrar = Registrar::new(context);

    for operator in [
        Operator::Power,
        Operator::Multiply,
        Operator::Divide,
        Operator::Modulo,
        Operator::Add,
        Operator::Subtract,
        Operator::Less,
        Operator::LessEqual,
        Operator::Greater,
        Operator::GreaterEqual,
    ] {
        let registered = registrar.function2(
            &operator_name("Number", operator),
            ParamSpec::<Number>::of("a"),
            ParamSpec::<Number>::of("b"),
            move |a, b| arithmetic(operator, a, b),
        );
        assert!(registered.is_success());
    }

    let equal = registrar.function2(
        &operator_name("Object", Operator::Equal),
        ParamSpec::<TypedValue>::of("a"),
        ParamSpec::<TypedValue>::of("b"),
        |a, b| a == b,
    );
    let not_equal = registrar.function2(
        &operator_name("Object", Operator::NotEqual),
        ParamSpec::<TypedValue>::of("a"),
        ParamSpec::<TypedValue>::of("b"),
        |a, b| a != b,
    );
    assert!(equal.is_success() && not_equal.is_success());

    let bitwise: [(Operator, fn(i64, i64) -> i64); 3] = [
        (Operator::BitAnd, |a, b| a & b),
        (Operator::BitOr, |a, b| a | b),
        (Operator::BitXor, |a, b| a ^ b),
    ];
    for (operator, apply) in bitwise {
        let registered = registrar.function2(
            &operator_name("Int", operator),
            ParamSpec::<i64>::of("a"),
            ParamSpec::<i64>::of("b"),
            apply,
        );
        assert!(registered.is_success());
    }

    let logical: [(Operator, fn(bool, bool) -> bool); 2] = [
        (Operator::And, |a, b| a && b),
        (Operator::Or, |a, b| a || b),
    ];
    for (operator, apply) in logical {
        let registered = registrar.function2(
            &operator_name("Boolean", operator),
            ParamSpec::<bool>::of("a"),
            ParamSpec::<bool>::of("b"),
            apply,
        );
        assert!(registered.is_success());
    }
}

/// Positional arguments.
pub fn positional(values: impl IntoIterator<Item = TypedValue>) -> Vec<Argument> {
    values.into_iter().map(Argument::positional).collect()
}
