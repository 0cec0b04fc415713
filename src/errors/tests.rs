//! Unit tests for error handling.
//!
//! This module contains tests for error categories and error rendering.

use crate::errors::errors::{Error, ErrorImpl, ErrorKind};

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        10,
    );

    assert_eq!(error.get_error_name(), "SyntaxError");
    assert_eq!(error.get_line(), 10);
}

#[test]
fn test_resolve_error_kind() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: "foo".to_string(),
        },
        3,
    );

    assert_eq!(error.get_kind(), ErrorKind::Resolve);
    assert_eq!(
        error.to_string(),
        "ResolveError: variable \"foo\" is not declared at line 3"
    );
}

#[test]
fn test_type_error_display() {
    let error = Error::new(
        ErrorImpl::InvalidBinaryOperation {
            operator: "+".to_string(),
            left: "number".to_string(),
            right: "bool".to_string(),
        },
        7,
    );

    assert_eq!(error.get_kind(), ErrorKind::Type);
    assert_eq!(
        error.to_string(),
        "TypeError: invalid + operation between number and bool at line 7"
    );
}

#[test]
fn test_division_by_zero_display() {
    let error = Error::new(ErrorImpl::DivisionByZero, 1);

    assert_eq!(error.get_kind(), ErrorKind::Runtime);
    assert_eq!(
        error.to_string(),
        "RuntimeError: can not do division by zero at line 1"
    );
}

#[test]
fn test_invalid_assignment_target_is_syntax() {
    let error = Error::new(ErrorImpl::InvalidAssignmentTarget, 2);

    assert_eq!(error.get_kind(), ErrorKind::Syntax);
}

#[test]
fn test_not_callable_is_type_error() {
    let error = Error::new(
        ErrorImpl::NotCallable {
            type_: "number".to_string(),
        },
        4,
    );

    assert_eq!(error.get_error_name(), "TypeError");
}

#[test]
fn test_missing_return_is_runtime_error() {
    let error = Error::new(
        ErrorImpl::MissingReturn {
            function: "f".to_string(),
        },
        9,
    );

    assert_eq!(error.get_error_name(), "RuntimeError");
    assert_eq!(
        error.to_string(),
        "RuntimeError: function f ended without returning a value at line 9"
    );
}
