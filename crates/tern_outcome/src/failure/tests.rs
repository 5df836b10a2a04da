use super::*;
use pretty_assertions::assert_eq;
use std::error::Error as _;

fn denied() -> Failure {
    Failure::new(ErrorCode::AccessDenied, "denied")
}

#[test]
fn test_display_includes_code() {
    assert_eq!(denied().to_string(), "T1001: denied");
}

#[test]
fn test_caused_by_replaces_direct_cause() {
    let first = Failure::new(ErrorCode::Native, "first");
    let second = Failure::new(ErrorCode::Native, "second");
    let failure = denied().caused_by(first).caused_by(second.clone());
    assert_eq!(failure.cause.as_deref(), Some(&second));
}

#[test]
fn test_with_root_cause_appends() {
    let failure = Failure::new(ErrorCode::FailedToSetVariable, "set")
        .caused_by(denied())
        .with_root_cause(Failure::new(ErrorCode::Native, "parent attempt"));

    let codes: Vec<_> = failure.chain().map(|f| f.code).collect();
    assert_eq!(
        codes,
        vec![
            ErrorCode::FailedToSetVariable,
            ErrorCode::AccessDenied,
            ErrorCode::Native
        ]
    );
    assert_eq!(failure.root_cause().message, "parent attempt");
}

#[test]
fn test_root_cause_of_single_failure_is_itself() {
    let failure = denied();
    assert_eq!(failure.root_cause(), &failure);
}

#[test]
fn test_has_code_searches_chain() {
    let failure = Failure::new(ErrorCode::FailedToRegisterFunction, "register").caused_by(denied());
    assert!(failure.has_code(ErrorCode::AccessDenied));
    assert!(!failure.has_code(ErrorCode::UndeclaredVariable));
}

#[test]
fn test_error_source_follows_cause() {
    let failure = Failure::new(ErrorCode::FailedToSetVariable, "set").caused_by(denied());
    let source = failure.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("T1001: denied"));
    assert!(denied().source().is_none());
}
