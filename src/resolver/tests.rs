//! Unit tests for the resolver module.

use pretty_assertions::assert_eq;

use crate::{
    ast::ast::{NodeId, Program},
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    scope::scope_stack::Address,
};

use super::resolver::{resolve, Resolutions};

fn parse_source(source: &str) -> Program {
    parse(tokenize(source.to_string()).unwrap()).unwrap()
}

fn resolve_source(source: &str) -> Result<Resolutions, Error> {
    resolve(&parse_source(source))
}

fn address(resolutions: &Resolutions, id: u32) -> Option<Address> {
    resolutions.get(NodeId(id))
}

#[test]
fn test_every_identifier_is_resolved() {
    let program = parse_source("let x: number = 1;\nfn f(a: number) -> number { return a + x; }\nprint(f(x));");
    let resolutions = resolve(&program).unwrap();

    assert_eq!(resolutions.len(), program.node_count as usize);
    for id in 0..program.node_count {
        assert!(address(&resolutions, id).is_some(), "node #{} unresolved", id);
    }
}

#[test]
fn test_resolution_is_deterministic() {
    let program = parse_source(
        "fn counter() -> fn() -> number {\n  let count: number = 0;\n  fn next() -> number { count = count + 1; return count; }\n  return next;\n}",
    );

    assert_eq!(resolve(&program).unwrap(), resolve(&program).unwrap());
}

#[test]
fn test_shadowing_in_blocks() {
    // x(0) { x(1) x(2) } { x(3) }
    let resolutions = resolve_source(
        "let x: number = 1;\n{ let x: number = 2; print(x); }\n{ print(x); }",
    )
    .unwrap();

    assert_eq!(address(&resolutions, 0), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 1), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 2), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 3), Some(Address::new(1, 0)));
}

#[test]
fn test_functions_take_the_first_slots() {
    let resolutions = resolve_source("let a: number = 1;\nfn f() {}").unwrap();

    assert_eq!(address(&resolutions, 0), Some(Address::new(0, 1)));
    assert_eq!(address(&resolutions, 1), Some(Address::new(0, 0)));
}

#[test]
fn test_parameters_share_the_body_frame() {
    // f(0) a(1) b(2) | b(3) c(4) c(5)
    let resolutions =
        resolve_source("fn f(a: number, b: number) { print(b); let c: number = 1; print(c); }")
            .unwrap();

    assert_eq!(address(&resolutions, 3), Some(Address::new(0, 1)));
    assert_eq!(address(&resolutions, 4), Some(Address::new(0, 2)));
    assert_eq!(address(&resolutions, 5), Some(Address::new(0, 2)));
}

#[test]
fn test_captured_variable_distance() {
    // outer(0) n(1) inner(2) n(3) n(4)
    let resolutions =
        resolve_source("fn outer() { let n: number = 0; fn inner() { n = n + 1; } }").unwrap();

    // inner is registered before n in outer's frame
    assert_eq!(address(&resolutions, 2), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 1), Some(Address::new(0, 1)));
    assert_eq!(address(&resolutions, 3), Some(Address::new(1, 1)));
    assert_eq!(address(&resolutions, 4), Some(Address::new(1, 1)));
}

#[test]
fn test_for_loop_scope() {
    // i(0) i(1) i(2) i(3) i(4)
    let resolutions =
        resolve_source("for let i: number = 0; i < 3; i = i + 1 { print(i); }").unwrap();

    assert_eq!(address(&resolutions, 1), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 2), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 4), Some(Address::new(1, 0)));
}

#[test]
fn test_redeclaration_reuses_slot() {
    let resolutions =
        resolve_source("let x: number = 1;\nlet y: number = 2;\nlet x: string = \"a\";\nprint(x);")
            .unwrap();

    assert_eq!(address(&resolutions, 2), Some(Address::new(0, 0)));
    assert_eq!(address(&resolutions, 3), Some(Address::new(0, 0)));
}

#[test]
fn test_mutual_recursion_resolves() {
    let result = resolve_source("fn a() { b(); }\nfn b() { a(); }");

    assert!(result.is_ok());
}

#[test]
fn test_forward_declaration_then_definition() {
    let result = resolve_source("fn f(n: number);\nprint(f);\nfn f(n: number) { print(n); }");

    assert!(result.is_ok());
}

#[test]
fn test_undeclared_variable() {
    let error = resolve_source("let a: number = 1;\n\nprint(b);").unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Resolve);
    assert_eq!(error.get_line(), 3);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::VariableNotDeclared {
            variable: "b".to_string()
        }
    );
}

#[test]
fn test_use_before_declaration() {
    let error = resolve_source("print(x);\nlet x: number = 1;").unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Resolve);
    assert_eq!(error.get_line(), 1);
}

#[test]
fn test_initializer_cannot_see_its_own_name() {
    let error = resolve_source("let x: number = x;").unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Resolve);
}

#[test]
fn test_block_variable_not_visible_after_block() {
    let error = resolve_source("{ let inner: number = 1; }\nprint(inner);").unwrap_err();

    assert_eq!(error.get_kind(), ErrorKind::Resolve);
    assert_eq!(error.get_line(), 2);
}

#[test]
fn test_assignment_to_undeclared_name() {
    let error = resolve_source("\nmissing = 3;").unwrap_err();

    assert_eq!(error.to_string(), "ResolveError: variable \"missing\" is not declared at line 2");
}
