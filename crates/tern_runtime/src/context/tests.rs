#![allow(clippy::unwrap_used)]

use super::*;
use crate::options::RecursionLimits;
use crate::restriction::RecursionLimiter;
use crate::test_helpers::init_test_logging;
use pretty_assertions::assert_eq;
use tern_outcome::errors::access_denied;
use tern_outcome::ErrorCode;

/// Refuses every write and registration in the outermost context.
struct FrozenRoot;

impl Restriction for FrozenRoot {
    fn can_set_variable(
        &self,
        context: &Context,
        key: &str,
        _global: bool,
        _value: &TypedValue,
        _parent_attempt: Option<&Outcome<()>>,
    ) -> Outcome<crate::Grant> {
        if context.depth() == 0 {
            Outcome::Failure(access_denied(&format!("set '{key}' in the root")))
        } else {
            Outcome::Empty
        }
    }

    fn can_register_function(
        &self,
        context: &Context,
        name: &str,
        _function: &Function,
        _global: bool,
    ) -> Outcome<crate::Grant> {
        if context.depth() == 0 {
            Outcome::Failure(access_denied(&format!("register '{name}' in the root")))
        } else {
            Outcome::Empty
        }
    }
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
    ) -> Outcome<crate::Grant> {
        Outcome::Failure(access_denied(&format!("set '{key}'")))
    }
}

/// Keeps lookups from leaving the context.
struct Sealed;

impl Restriction for Sealed {
    fn can_ask_parent_for_variable(&self, _context: &Context, key: &str) -> Outcome<crate::Grant> {
        Outcome::Failure(access_denied(&format!("look up '{key}' outside")))
    }
}

fn global() -> ContextRef {
    init_test_logging();
    ContextRef::permissive()
}

fn noop(name: &str) -> Rc<Function> {
    Function::builder(name)
        .native_sync(|_| Outcome::Success(TypedValue::Undefined))
        .build()
        .unwrap()
}

// Variables

#[test]
fn test_scope_reads_through_to_parent() {
    let global = global();
    assert!(global.set("x", false, TypedValue::Int(1)).is_success());

    let scope = global.scope(ScopeMarker::default());
    assert_eq!(scope.get("x"), Outcome::Success(TypedValue::Int(1)));
    assert!(scope.contains("x"));
    assert!(!scope.contains_local("x"));
    assert!(scope.get("y").is_empty());
}

#[test]
fn test_local_write_shadows_parent() {
    let global = global();
    assert!(global.set("x", false, TypedValue::Int(1)).is_success());

    let scope = global.scope(ScopeMarker::new("inner"));
    assert!(scope.set("x", false, TypedValue::Int(2)).is_success());

    assert_eq!(scope.get("x"), Outcome::Success(TypedValue::Int(2)));
    assert_eq!(global.get("x"), Outcome::Success(TypedValue::Int(1)));
}

#[test]
fn test_global_write_lands_in_root() {
    let global = global();
    let scope = global.scope(ScopeMarker::default()).scope(ScopeMarker::default());

    assert!(scope.set("g", true, TypedValue::string("hi")).is_success());
    assert!(global.contains_local("g"));
    assert!(!scope.contains_local("g"));
}

#[test]
fn test_global_write_replaces_local_shadow() {
    let global = global();
    assert!(global.set("x", false, TypedValue::Int(1)).is_success());

    let scope = global.scope(ScopeMarker::default());
    assert!(scope.set("x", false, TypedValue::Int(2)).is_success());
    assert_eq!(global.get("x"), Outcome::Success(TypedValue::Int(1)));

    assert!(scope.set("x", true, TypedValue::Int(3)).is_success());
    assert_eq!(global.get("x"), Outcome::Success(TypedValue::Int(3)));
    assert_eq!(scope.get("x"), Outcome::Success(TypedValue::Int(3)));
    assert!(!scope.contains_local("x"));
}

#[test]
fn test_global_write_falls_back_to_local() {
    init_test_logging();
    let root = ContextRef::global(Rc::new(FrozenRoot));
    let scope = root.scope(ScopeMarker::default());

    assert!(scope.set("g", true, TypedValue::Int(3)).is_success());
    assert!(scope.contains_local("g"));
    assert!(!root.contains("g"));
}

#[test]
fn test_require_reports_undeclared() {
    let global = global();
    let failure = global.require("missing").into_failure().unwrap();
    assert_eq!(failure.code, ErrorCode::UndeclaredVariable);
    assert!(failure.message.contains("missing"));
}

#[test]
fn test_denied_write_carries_cause() {
    init_test_logging();
    let root = ContextRef::global(Rc::new(ReadOnly));
    let failure = root
        .set("x", false, TypedValue::Int(1))
        .into_failure()
        .unwrap();
    assert_eq!(failure.code, ErrorCode::FailedToSetVariable);
    assert_eq!(failure.root_cause().code, ErrorCode::AccessDenied);
}

#[test]
fn test_denied_global_write_keeps_parent_attempt() {
    init_test_logging();
    let root = ContextRef::global(Rc::new(ReadOnly));
    let scope = root.scope(ScopeMarker::default());

    let failure = scope
        .set("x", true, TypedValue::Int(1))
        .into_failure()
        .unwrap();
    let codes: Vec<_> = failure.chain().map(|failure| failure.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::FailedToSetVariable,
            ErrorCode::AccessDenied,
            ErrorCode::FailedToSetVariable,
            ErrorCode::AccessDenied,
        ]
    );
}

#[test]
fn test_denied_parent_lookup_is_access_denied() {
    init_test_logging();
    let root = ContextRef::permissive();
    assert!(root.set("secret", false, TypedValue::Int(1)).is_success());
    let child = ContextBuilder::new()
        .parent(&root)
        .restriction(Rc::new(Sealed))
        .build();

    let failure = child.get("secret").into_failure().unwrap();
    assert_eq!(failure.code, ErrorCode::AccessDenied);
    assert!(failure.cause.is_some());

    // Local variables are still readable.
    assert!(child.set("own", false, TypedValue::Int(2)).is_success());
    assert_eq!(child.get("own"), Outcome::Success(TypedValue::Int(2)));
}

// Functions

#[test]
fn test_register_sanitizes_and_accumulates_overloads() {
    let global = global();
    assert!(global.register("  my   fn ", noop("a"), false).is_success());
    assert!(global.register("my_fn", noop("b"), false).is_success());

    assert!(global.has_local_function("my fn"));
    let names: Vec<_> = global
        .local_overloads("my_fn")
        .iter()
        .map(|function| function.name().to_owned())
        .collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_global_register_lands_in_root() {
    let global = global();
    let scope = global.scope(ScopeMarker::default());
    assert!(scope.register("f", noop("f"), true).is_success());

    assert!(global.has_local_function("f"));
    assert!(!scope.has_local_function("f"));
}

#[test]
fn test_denied_registration_wraps_cause() {
    init_test_logging();
    let root = ContextRef::global(Rc::new(FrozenRoot));
    let failure = root.register("f", noop("f"), false).into_failure().unwrap();
    assert_eq!(failure.code, ErrorCode::FailedToRegisterFunction);
    assert!(failure.has_code(ErrorCode::AccessDenied));

    // From a scope, a global registration falls back to the scope itself.
    let scope = root.scope(ScopeMarker::default());
    assert!(scope.register("f", noop("f"), true).is_success());
    assert!(scope.has_local_function("f"));
}

#[test]
fn test_sanitize_name() {
    assert_eq!(sanitize_name("plain"), "plain");
    assert_eq!(sanitize_name("  padded  "), "padded");
    assert_eq!(sanitize_name("two  words"), "two_words");
    assert_eq!(sanitize_name("a \t b\nc"), "a_b_c");
    assert_eq!(sanitize_name("   "), "");
}

// Structure

#[test]
fn test_depth_and_ancestry() {
    let global = global();
    let scope = global.scope(ScopeMarker::new("loop"));
    let call = scope.function_call(noop("f"), Rc::clone(scope.restriction()));

    assert_eq!(global.depth(), 0);
    assert_eq!(scope.depth(), 1);
    assert_eq!(call.depth(), 2);
    assert_eq!(call.ancestry().count(), 3);
    assert!(call.parent().unwrap().ptr_eq(&scope));
    assert!(matches!(scope.kind(), ContextKind::Scope(marker) if marker.label() == "loop"));
    assert!(call.invoked_function().is_some());
    assert!(scope.invoked_function().is_none());
}

#[test]
fn test_active_invocations_match_function_identity() {
    let global = global();
    let f = noop("f");
    let twin = noop("f");
    let once = global.function_call(Rc::clone(&f), Rc::new(PermissiveRestriction));
    let twice = once.function_call(Rc::clone(&f), Rc::new(PermissiveRestriction));
    let other = twice.function_call(Rc::clone(&twin), Rc::new(PermissiveRestriction));

    assert_eq!(other.active_invocations(&f), 2);
    assert_eq!(other.active_invocations(&twin), 1);
    assert_eq!(global.active_invocations(&f), 0);
}

#[test]
fn test_builder_inherits_from_parent() {
    init_test_logging();
    let options = ContextOptions::default().null_type_coercible(true);
    let root = ContextBuilder::new()
        .options(options.clone())
        .recursion_limits(RecursionLimits::default())
        .build();
    let chained = ContextRef::root(Some(&root), Rc::new(PermissiveRestriction));
    let inherited = ContextBuilder::new().parent(&root).build();

    assert_eq!(chained.options(), &options);
    assert_eq!(chained.depth(), 1);
    assert!(matches!(chained.kind(), ContextKind::Global));
    assert!(Rc::ptr_eq(inherited.restriction(), root.restriction()));

    let unchained = ContextRef::root(None, Rc::new(RecursionLimiter::default()));
    assert_eq!(unchained.options(), &ContextOptions::default());
    assert!(unchained.parent().is_none());
}

#[test]
fn test_scope_inherits_options() {
    init_test_logging();
    let root = ContextBuilder::new()
        .options(ContextOptions::default().undefined_type_coercible(true))
        .build();
    let scope = root.scope(ScopeMarker::default());
    assert!(scope.options().undefined_type_coercible);
}
