#![allow(clippy::unwrap_used)]

use super::*;
use crate::context::ContextBuilder;
use crate::function::{ParamSpec, Registrar};
use crate::member::MemberKey;
use crate::options::ContextOptions;
use crate::test_helpers::init_test_logging;
use pretty_assertions::assert_eq;
use tern_outcome::ErrorCode;

fn global() -> ContextRef {
    init_test_logging();
    ContextRef::permissive()
}

// Classification

#[test]
fn test_scalars_are_fixed_and_lazy_values_runtime() {
    assert_eq!(TypedValue::Int(1).evaluation_kind(), EvaluationKind::Fixed);
    assert_eq!(TypedValue::Null.evaluation_kind(), EvaluationKind::Fixed);
    assert_eq!(
        TypedValue::reference("x").evaluation_kind(),
        EvaluationKind::Runtime
    );
    assert_eq!(
        TypedValue::call("f", Vec::new()).evaluation_kind(),
        EvaluationKind::Runtime
    );
    assert_eq!(TypedValue::reference("x").type_info().name(), "Runtime");
}

#[test]
fn test_array_stability_follows_elements() {
    let fixed = ArrayValue::new(vec![TypedValue::Int(1), TypedValue::string("a")]);
    assert_eq!(fixed.stability(), Stability::Stable);

    let mixed = ArrayValue::new(vec![TypedValue::Int(1), TypedValue::reference("x")]);
    assert_eq!(mixed.stability(), Stability::Unsure);

    let runtime = ArrayValue::runtime(vec![TypedValue::Int(1)]);
    assert_eq!(
        TypedValue::Array(runtime).evaluation_kind(),
        EvaluationKind::Runtime
    );
}

#[test]
fn test_nested_fixed_arrays_do_not_need_evaluation() {
    let context = global();
    let inner = TypedValue::array(vec![TypedValue::Int(1)]);
    let outer = TypedValue::array(vec![inner, TypedValue::Boolean(true)]);
    assert!(!outer.needs_evaluation(&context));

    let lazy = TypedValue::array(vec![TypedValue::Int(1), TypedValue::reference("x")]);
    assert!(lazy.needs_evaluation(&context));
}

// Evaluation

#[tokio::test]
async fn test_reference_reads_variable() {
    let context = global();
    assert!(context.set("x", false, TypedValue::Int(3)).is_success());

    let value = TypedValue::reference("x").resolve(&context).await;
    assert_eq!(value, Outcome::Success(TypedValue::Int(3)));
}

#[tokio::test]
async fn test_missing_reference_is_undeclared() {
    let context = global();
    let failure = TypedValue::reference("nope")
        .resolve(&context)
        .await
        .into_failure()
        .unwrap();
    assert_eq!(failure.code, ErrorCode::UndeclaredVariable);
}

#[tokio::test]
async fn test_unsure_array_evaluates_elements() {
    let context = global();
    assert!(context.set("x", false, TypedValue::Int(7)).is_success());

    let array = TypedValue::array(vec![TypedValue::Int(1), TypedValue::reference("x")]);
    let evaluated = array.resolve(&context).await.success().unwrap();
    assert_eq!(
        evaluated,
        TypedValue::array(vec![TypedValue::Int(1), TypedValue::Int(7)])
    );
    assert_eq!(evaluated.evaluation_kind(), EvaluationKind::Fixed);
}

#[tokio::test]
async fn test_array_element_failure_aborts() {
    let context = global();
    let array = TypedValue::array(vec![TypedValue::reference("missing"), TypedValue::Int(1)]);
    let outcome = array.resolve(&context).await;
    assert!(outcome.is_failure());
}

#[tokio::test]
async fn test_unknown_call_is_undeclared_function() {
    let context = global();
    let failure = TypedValue::call("nothing", Vec::new())
        .resolve(&context)
        .await
        .into_failure()
        .unwrap();
    assert_eq!(failure.code, ErrorCode::UndeclaredFunction);
    assert!(failure.message.contains("nothing"));
}

// Native coercion

#[test]
fn test_coerce_between_scalars() {
    let options = ContextOptions::default();
    let cases = [
        (TypedValue::Int(5), TypeInfo::string(), TypedValue::string("5")),
        (TypedValue::string("5"), TypeInfo::int(), TypedValue::Int(5)),
        (TypedValue::string(" 42 "), TypeInfo::int(), TypedValue::Int(42)),
        (TypedValue::string("4.5"), TypeInfo::number(), TypedValue::Double(4.5)),
        (TypedValue::string("4"), TypeInfo::number(), TypedValue::Int(4)),
        (TypedValue::Boolean(true), TypeInfo::int(), TypedValue::Int(1)),
        (TypedValue::string("false"), TypeInfo::boolean(), TypedValue::Boolean(false)),
        (TypedValue::Double(3.9), TypeInfo::int(), TypedValue::Int(3)),
        (TypedValue::Double(-3.9), TypeInfo::int(), TypedValue::Int(-3)),
        (TypedValue::Int(2), TypeInfo::double(), TypedValue::Double(2.0)),
        (TypedValue::Char('A'), TypeInfo::int(), TypedValue::Int(65)),
        (TypedValue::string("x"), TypeInfo::char(), TypedValue::Char('x')),
    ];
    for (value, target, expected) in cases {
        assert_eq!(
            value.coerce_native(&options, &target),
            Outcome::Success(expected),
            "{value} as {target}"
        );
    }
}

#[test]
fn test_coerce_within_hierarchy_is_identity() {
    let options = ContextOptions::default();
    let value = TypedValue::Int(9);
    assert_eq!(
        value.coerce_native(&options, &TypeInfo::number()),
        Outcome::Success(TypedValue::Int(9))
    );
    assert_eq!(
        value.coerce_native(&options, &TypeInfo::object()),
        Outcome::Success(TypedValue::Int(9))
    );
}

#[test]
fn test_unparseable_string_has_no_native_conversion() {
    let options = ContextOptions::default();
    assert!(TypedValue::string("abc")
        .coerce_native(&options, &TypeInfo::int())
        .is_empty());
    assert!(TypedValue::string("ab")
        .coerce_native(&options, &TypeInfo::char())
        .is_empty());
    assert!(TypedValue::Double(f64::NAN)
        .coerce_native(&options, &TypeInfo::int())
        .is_empty());
}

#[test]
fn test_array_converts_only_to_string() {
    let options = ContextOptions::default();
    let array = TypedValue::array(vec![TypedValue::Int(1), TypedValue::Int(2)]);
    assert_eq!(
        array.coerce_native(&options, &TypeInfo::string()),
        Outcome::Success(TypedValue::string("[1, 2]"))
    );
    assert!(array.coerce_native(&options, &TypeInfo::int()).is_empty());
}

#[test]
fn test_null_is_not_coercible_by_default() {
    let options = ContextOptions::default();
    for target in [TypeInfo::string(), TypeInfo::int(), TypeInfo::boolean()] {
        assert!(TypedValue::Null.coerce_native(&options, &target).is_empty());
        assert!(TypedValue::Undefined
            .coerce_native(&options, &target)
            .is_empty());
    }
}

#[test]
fn test_coercible_sentinels_take_neutral_values() {
    let options = ContextOptions::default()
        .null_type_coercible(true)
        .undefined_type_coercible(true);
    assert_eq!(
        TypedValue::Null.coerce_native(&options, &TypeInfo::string()),
        Outcome::Success(TypedValue::string("null"))
    );
    assert_eq!(
        TypedValue::Undefined.coerce_native(&options, &TypeInfo::string()),
        Outcome::Success(TypedValue::string("undefined"))
    );
    assert_eq!(
        TypedValue::Null.coerce_native(&options, &TypeInfo::int()),
        Outcome::Success(TypedValue::Int(0))
    );
    assert_eq!(
        TypedValue::Null.coerce_native(&options, &TypeInfo::double()),
        Outcome::Success(TypedValue::Double(0.0))
    );
    assert_eq!(
        TypedValue::Undefined.coerce_native(&options, &TypeInfo::boolean()),
        Outcome::Success(TypedValue::Boolean(false))
    );
}

// Coercion through a context

#[tokio::test]
async fn test_as_type_evaluates_first() {
    let context = global();
    assert!(context.set("n", false, TypedValue::Int(12)).is_success());

    let text = TypedValue::reference("n").as_string(&context).await;
    assert_eq!(text, Outcome::Success(Rc::from("12")));

    let number = TypedValue::string("2.5").as_number(&context).await;
    assert_eq!(number, Outcome::Success(Number::Double(2.5)));

    let flag = TypedValue::Int(0).as_boolean(&context).await;
    assert_eq!(flag, Outcome::Success(false));
}

#[tokio::test]
async fn test_as_type_honors_context_options() {
    init_test_logging();
    let strict = ContextRef::permissive();
    assert!(TypedValue::Null.as_string(&strict).await.is_empty());

    let lenient = ContextBuilder::new()
        .options(ContextOptions::default().null_type_coercible(true))
        .build();
    assert_eq!(
        TypedValue::Null.as_string(&lenient).await,
        Outcome::Success(Rc::from("null"))
    );
    // Only Null was opted in.
    assert!(TypedValue::Undefined.as_string(&lenient).await.is_empty());
}

#[tokio::test]
async fn test_as_type_falls_back_to_cast_operator() {
    let context = global();
    let cast = MemberKey::cast("Array", "Int").to_string();
    let registered = Registrar::new(&context).function1(
        &cast,
        ParamSpec::<ArrayValue>::of("self"),
        |array: ArrayValue| i64::try_from(array.len()).unwrap_or(i64::MAX),
    );
    assert!(registered.is_success());

    let array = TypedValue::array(vec![TypedValue::Null, TypedValue::Null, TypedValue::Null]);
    let converted = array.as_type(&context, &TypeInfo::int()).await;
    assert_eq!(converted, Outcome::Success(TypedValue::Int(3)));
}

#[tokio::test]
async fn test_blocked_sentinel_skips_cast_operator() {
    let context = global();
    let cast = MemberKey::cast("Null", "Int").to_string();
    let registered = Registrar::new(&context).function1(
        &cast,
        ParamSpec::<TypedValue>::of("self"),
        |_value: TypedValue| 99_i64,
    );
    assert!(registered.is_success());

    let converted = TypedValue::Null.as_type(&context, &TypeInfo::int()).await;
    assert!(converted.is_empty());
}

#[test]
fn test_display() {
    assert_eq!(TypedValue::string("hi").to_string(), "\"hi\"");
    assert_eq!(TypedValue::Char('c').to_string(), "'c'");
    assert_eq!(TypedValue::Null.to_string(), "null");
    assert_eq!(
        TypedValue::member_call(
            TypedValue::reference("p"),
            "move",
            vec![crate::function::Argument::named("dx", TypedValue::Int(1))],
        )
        .to_string(),
        "p.move(dx: 1)"
    );
}
