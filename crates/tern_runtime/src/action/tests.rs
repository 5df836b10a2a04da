#![allow(clippy::unwrap_used)]

use super::*;
use crate::restriction::Restriction;
use crate::test_helpers::init_test_logging;
use crate::{Context, Grant};
use pretty_assertions::assert_eq;
use tern_outcome::errors::access_denied;
use tern_outcome::ErrorCode;

fn global() -> ContextRef {
    init_test_logging();
    ContextRef::permissive()
}

fn block(actions: Vec<Action>) -> Block {
    Block::new(ScopeMarker::default(), actions)
}

#[tokio::test]
async fn test_block_value_is_last_evaluation() {
    let context = global();
    let body = block(vec![
        Action::Evaluate(TypedValue::Int(1)),
        Action::assign("y", TypedValue::Int(2)),
        Action::Evaluate(TypedValue::reference("y")),
        Action::assign("z", TypedValue::Int(3)),
    ]);
    assert_eq!(body.run(&context).await, Outcome::Success(TypedValue::Int(2)));
}

#[tokio::test]
async fn test_block_without_evaluation_is_undefined() {
    let context = global();
    let body = block(vec![Action::assign("x", TypedValue::Int(1))]);
    assert_eq!(body.run(&context).await, Outcome::Success(TypedValue::Undefined));
    assert_eq!(
        block(Vec::new()).run(&context).await,
        Outcome::Success(TypedValue::Undefined)
    );
}

#[tokio::test]
async fn test_block_locals_stay_in_block() {
    let context = global();
    let body = block(vec![
        Action::assign("local", TypedValue::Int(1)),
        Action::assign_global("shared", TypedValue::Int(2)),
    ]);
    assert!(body.run(&context).await.is_success());

    assert!(!context.contains("local"));
    assert_eq!(context.get("shared"), Outcome::Success(TypedValue::Int(2)));
}

#[tokio::test]
async fn test_nested_block_scoping() {
    let context = global();
    let inner = block(vec![
        Action::assign("x", TypedValue::Int(2)),
        Action::Evaluate(TypedValue::reference("x")),
    ]);
    let outer = block(vec![
        Action::assign("x", TypedValue::Int(1)),
        Action::Block(inner),
        Action::Evaluate(TypedValue::reference("x")),
    ]);
    assert_eq!(outer.run(&context).await, Outcome::Success(TypedValue::Int(1)));
}

#[tokio::test]
async fn test_nested_block_value_is_not_the_outer_value() {
    let context = global();
    let outer = block(vec![block_action(vec![Action::Evaluate(TypedValue::Int(5))])]);
    assert_eq!(outer.run(&context).await, Outcome::Success(TypedValue::Undefined));
}

fn block_action(actions: Vec<Action>) -> Action {
    Action::Block(block(actions))
}

#[tokio::test]
async fn test_failure_aborts_remaining_actions() {
    let context = global();
    let body = block(vec![
        Action::Evaluate(TypedValue::reference("missing")),
        Action::assign_global("after", TypedValue::Int(1)),
    ]);
    let failure = body.run(&context).await.into_failure().unwrap();
    assert_eq!(failure.code, ErrorCode::UndeclaredVariable);
    assert!(!context.contains("after"));
}

/// Refuses every write.
struct ReadOnly;

impl Restriction for ReadOnly {
    fn can_set_variable(
        &self,
        _context: &Context,
        key: &str,
        _global: bool,
        _value: &TypedValue,
        _parent_attempt: Option<&Outcome<()>>,
    ) -> Outcome<Grant> {
        Outcome::Failure(access_denied(&format!("set '{key}'")))
    }
}

#[tokio::test]
async fn test_denied_assignment_fails_block() {
    init_test_logging();
    let context = ContextRef::global(Rc::new(ReadOnly));
    let body = block(vec![
        Action::assign("x", TypedValue::Int(1)),
        Action::Evaluate(TypedValue::Int(2)),
    ]);
    let failure = body.run(&context).await.into_failure().unwrap();
    assert_eq!(failure.code, ErrorCode::FailedToSetVariable);
}

#[tokio::test]
async fn test_declare_then_call() {
    let context = global();
    let seven = Function::builder("seven")
        .native_sync(|_| Outcome::Success(TypedValue::Int(7)))
        .build()
        .unwrap();
    let body = block(vec![
        Action::declare("seven", seven),
        Action::Evaluate(TypedValue::call("seven", Vec::new())),
    ]);
    assert_eq!(body.run(&context).await, Outcome::Success(TypedValue::Int(7)));

    // Declared in the block's scope only.
    assert!(!context.has_local_function("seven"));
}

#[tokio::test]
async fn test_assign_stores_evaluated_value() {
    let context = global();
    assert!(context.set("a", false, TypedValue::Int(3)).is_success());
    let action = Action::assign("b", TypedValue::reference("a"));
    assert_eq!(action.run(&context).await, Outcome::Success(TypedValue::Undefined));
    assert_eq!(context.get("b"), Outcome::Success(TypedValue::Int(3)));
}

#[test]
fn test_block_display() {
    let body = Block::new(
        ScopeMarker::new("loop"),
        vec![Action::Evaluate(TypedValue::Null), Action::Evaluate(TypedValue::Null)],
    );
    assert_eq!(body.to_string(), "loop { 2 actions }");
    assert_eq!(body.actions().len(), 2);
    assert_eq!(body.marker().label(), "loop");
}
