//! Unit tests for the interpreter module.
//!
//! Programs here are resolved but not type checked, so operations the checker
//! would reject reach the interpreter's own runtime checks.

use pretty_assertions::assert_eq;

use crate::{
    ast::expressions::{BinaryOperator, UnaryOperator},
    errors::errors::{Error, ErrorImpl, ErrorKind},
    lexer::lexer::tokenize,
    parser::parser::parse,
    resolver::resolver::resolve,
};

use super::{
    interpreter::{apply_binary, apply_unary, interpret, Interpreter, MAX_REPEAT_LEN},
    value::Value,
};

fn execute(source: &str) -> (Vec<u8>, Result<(), Error>) {
    let program = parse(tokenize(source.to_string()).unwrap()).unwrap();
    let resolutions = resolve(&program).unwrap();

    let mut out = Vec::new();
    let result = interpret(&program, &resolutions, &mut out);
    (out, result)
}

fn output(source: &str) -> String {
    let (out, result) = execute(source);
    if let Err(error) = result {
        panic!("program failed: {}", error);
    }
    String::from_utf8(out).unwrap()
}

fn runtime_error(source: &str) -> Error {
    let (_, result) = execute(source);
    let error = result.unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Runtime, "unexpected error: {}", error);
    error
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Number(3.0).to_string(), "3");
    assert_eq!(Value::Number(4.5).to_string(), "4.5");
    assert_eq!(Value::Number(-0.25).to_string(), "-0.25");
    assert_eq!(Value::Boolean(false).to_string(), "false");
    assert_eq!(Value::String("raw text".to_string()).to_string(), "raw text");
    assert_eq!(Value::Void.to_string(), "void");
}

#[test]
fn test_apply_binary_arithmetic() {
    let result = apply_binary(BinaryOperator::Modulo, Value::Number(7.0), Value::Number(4.0), 1);
    assert_eq!(result, Ok(Value::Number(3.0)));

    let result = apply_binary(
        BinaryOperator::Plus,
        Value::String("ab".to_string()),
        Value::String("cd".to_string()),
        1,
    );
    assert_eq!(result, Ok(Value::String("abcd".to_string())));
}

#[test]
fn test_apply_binary_string_repetition() {
    let repeat = |count: f64| {
        apply_binary(
            BinaryOperator::Multiply,
            Value::String("ab".to_string()),
            Value::Number(count),
            1,
        )
    };

    assert_eq!(repeat(3.0), Ok(Value::String("ababab".to_string())));
    assert_eq!(repeat(2.9), Ok(Value::String("abab".to_string())));
    assert_eq!(repeat(0.0), Ok(Value::String(String::new())));
    assert_eq!(repeat(-2.0), Ok(Value::String(String::new())));
    assert_eq!(repeat(f64::INFINITY), Ok(Value::String(String::new())));
}

#[test]
fn test_apply_binary_repetition_too_large() {
    let error = apply_binary(
        BinaryOperator::Multiply,
        Value::String("ab".to_string()),
        Value::Number(1e19),
        4,
    )
    .unwrap_err();
    assert_eq!(error.get_kind(), ErrorKind::Runtime);
    assert_eq!(error.get_line(), 4);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::RepeatTooLarge {
            count: "10000000000000000000".to_string(),
            limit: MAX_REPEAT_LEN,
        }
    );

    let just_over = (MAX_REPEAT_LEN / 2 + 1) as f64;
    let result = apply_binary(
        BinaryOperator::Multiply,
        Value::String("ab".to_string()),
        Value::Number(just_over),
        1,
    );
    assert!(matches!(
        result.unwrap_err().get_impl(),
        ErrorImpl::RepeatTooLarge { .. }
    ));

    let result = apply_binary(
        BinaryOperator::Multiply,
        Value::String(String::new()),
        Value::Number(1e19),
        1,
    );
    assert_eq!(result, Ok(Value::String(String::new())));
}

#[test]
fn test_apply_binary_division_by_zero() {
    for operator in [BinaryOperator::Divide, BinaryOperator::Modulo] {
        let error = apply_binary(operator, Value::Number(1.0), Value::Number(0.0), 7).unwrap_err();
        assert_eq!(error.get_impl(), &ErrorImpl::DivisionByZero);
        assert_eq!(error.get_line(), 7);
    }
}

#[test]
fn test_apply_binary_mixed_equality() {
    let result = apply_binary(
        BinaryOperator::Equal,
        Value::Number(1.0),
        Value::String("1".to_string()),
        1,
    );
    assert_eq!(result, Ok(Value::Boolean(false)));
}

#[test]
fn test_apply_binary_invalid_operands() {
    let error = apply_binary(
        BinaryOperator::Minus,
        Value::String("a".to_string()),
        Value::Number(1.0),
        2,
    )
    .unwrap_err();

    assert_eq!(
        error.to_string(),
        "RuntimeError: invalid - operation between string and number at line 2"
    );
}

#[test]
fn test_apply_unary() {
    assert_eq!(
        apply_unary(UnaryOperator::Negate, Value::Number(2.0), 1),
        Ok(Value::Number(-2.0))
    );
    assert_eq!(
        apply_unary(UnaryOperator::Not, Value::Boolean(true), 1),
        Ok(Value::Boolean(false))
    );
    assert!(apply_unary(UnaryOperator::Not, Value::Number(1.0), 1).is_err());
}

#[test]
fn test_print_order() {
    assert_eq!(output("print(1);\nprint(\"two\");\nprint(1 < 2);"), "1\ntwo\ntrue\n");
}

#[test]
fn test_block_shadowing() {
    let source = "let x: number = 1;\n\
                  { let x: number = 2; print(x); }\n\
                  { print(x); }\n\
                  print(x);";

    assert_eq!(output(source), "2\n1\n1\n");
}

#[test]
fn test_assignment_through_scopes() {
    let source = "let x: number = 1;\n{ { x = x + 10; } }\nprint(x);";

    assert_eq!(output(source), "11\n");
}

#[test]
fn test_if_else() {
    let source = "if 1 > 2 { print(\"then\"); } else { print(\"else\"); }\n\
                  if true { print(\"only\"); }\n\
                  if false print(\"never\");";

    assert_eq!(output(source), "else\nonly\n");
}

#[test]
fn test_while_loop() {
    let source = "let i: number = 0;\nwhile i < 3 { print(i); i = i + 1; }";

    assert_eq!(output(source), "0\n1\n2\n");
}

#[test]
fn test_for_loop() {
    let source = "for let i: number = 0; i < 3; i = i + 1 { let doubled: number = i * 2; print(doubled); }";

    assert_eq!(output(source), "0\n2\n4\n");
}

#[test]
fn test_function_call_and_return() {
    let source = "fn add(a: number, b: number) -> number { return a + b; }\nprint(add(2, 3));";

    assert_eq!(output(source), "5\n");
}

#[test]
fn test_call_before_declaration() {
    let source = "print(square(4));\nfn square(n: number) -> number { return n * n; }";

    assert_eq!(output(source), "16\n");
}

#[test]
fn test_recursion() {
    let source = "fn fib(n: number) -> number {\n\
                    if n < 2 { return n; }\n\
                    return fib(n - 1) + fib(n - 2);\n\
                  }\n\
                  print(fib(10));";

    assert_eq!(output(source), "55\n");
}

#[test]
fn test_return_from_inside_loop() {
    let source = "fn first_over(limit: number) -> number {\n\
                    for let i: number = 0; i < 100; i = i + 1 {\n\
                      if i * i > limit { return i; }\n\
                    }\n\
                    return -1;\n\
                  }\n\
                  print(first_over(50));\n\
                  print(first_over(20000));";

    assert_eq!(output(source), "8\n-1\n");
}

#[test]
fn test_closure_counter() {
    let source = "fn make_counter() -> fn() -> number {\n\
                    let count: number = 0;\n\
                    fn next() -> number { count = count + 1; return count; }\n\
                    return next;\n\
                  }\n\
                  let counter: fn() -> number = make_counter();\n\
                  counter();\n\
                  counter();\n\
                  print(counter());\n\
                  let other: fn() -> number = make_counter();\n\
                  print(other());";

    assert_eq!(output(source), "3\n1\n");
}

#[test]
fn test_closures_share_captured_frame() {
    let source = "let value: number = 0;\n\
                  fn set(n: number) { value = n; }\n\
                  fn get() -> number { return value; }\n\
                  set(42);\n\
                  print(get());\n\
                  value = 7;\n\
                  print(get());";

    assert_eq!(output(source), "42\n7\n");
}

#[test]
fn test_closure_uses_lexical_scope() {
    let source = "let x: string = \"global\";\n\
                  fn show() { print(x); }\n\
                  fn run() { let x: string = \"local\"; show(); }\n\
                  run();";

    assert_eq!(output(source), "global\n");
}

#[test]
fn test_function_values_print_name() {
    assert_eq!(output("fn greet() {}\nprint(greet);"), "<fn greet>\n");
}

#[test]
fn test_logical_operators_are_eager() {
    let source = "let calls: number = 0;\n\
                  fn touch() -> bool { calls = calls + 1; return true; }\n\
                  print(false && touch());\n\
                  print(true || touch());\n\
                  print(calls);";

    assert_eq!(output(source), "false\ntrue\n2\n");
}

#[test]
fn test_division_by_zero_line() {
    let error = runtime_error("print(1);\n\nprint(1 / 0);");

    assert_eq!(error.to_string(), "RuntimeError: can not do division by zero at line 3");
}

#[test]
fn test_output_before_error_is_kept() {
    let (out, result) = execute("print(\"before\");\nprint(5 % 0);\nprint(\"after\");");

    assert!(result.is_err());
    assert_eq!(String::from_utf8(out).unwrap(), "before\n");
}

#[test]
fn test_missing_parameter_is_unbound() {
    let error = runtime_error("fn show(a: number, b: number) { print(b); }\nshow(1);");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::UndefinedVariable {
            variable: "b".to_string()
        }
    );
}

#[test]
fn test_excess_arguments_are_ignored() {
    assert_eq!(output("fn show(a: number) { print(a); }\nshow(1, 2, 3);"), "1\n");
}

#[test]
fn test_calling_a_non_function() {
    let error = runtime_error("let x: number = 3;\nx();");

    assert_eq!(error.get_line(), 2);
    assert_eq!(
        error.get_impl(),
        &ErrorImpl::NotAFunction {
            value: "3".to_string()
        }
    );
}

#[test]
fn test_calling_forward_declaration_without_definition() {
    let error = runtime_error("fn later();\nlater();");

    assert!(matches!(error.get_impl(), ErrorImpl::UndefinedVariable { .. }));
}

#[test]
fn test_missing_return() {
    let error = runtime_error("fn f(n: number) -> number { if n > 0 { return n; } }\nprint(f(1));\nprint(f(0));");

    assert_eq!(
        error.to_string(),
        "RuntimeError: function f ended without returning a value at line 3"
    );
}

#[test]
fn test_non_boolean_condition() {
    let error = runtime_error("if 1 { print(1); }");

    assert_eq!(
        error.get_impl(),
        &ErrorImpl::InvalidConditionValue {
            value: "number".to_string()
        }
    );
}

#[test]
fn test_return_from_nested_blocks_restores_scope() {
    let source = "let x: number = 5;\n\
                  fn early() -> number { { { return 1; } } }\n\
                  print(early());\n\
                  print(x);";

    assert_eq!(output(source), "1\n5\n");
}

const COUNT_DOWN: &str = "fn down(n: number) -> number {\n\
                            if n == 0 { return 0; }\n\
                            return down(n - 1) + 1;\n\
                          }\n";

#[test]
fn test_deep_recursion_grows_stack() {
    let source = format!("{}print(down(5000));", COUNT_DOWN);

    assert_eq!(output(&source), "5000\n");
}

#[test]
fn test_call_depth_limit() {
    let source = format!("{}print(down(49));\nprint(down(50));", COUNT_DOWN);
    let program = parse(tokenize(source).unwrap()).unwrap();
    let resolutions = resolve(&program).unwrap();

    let mut out = Vec::new();
    let result = Interpreter::new(&resolutions, &mut out)
        .with_max_call_depth(50)
        .run(&program);

    assert_eq!(String::from_utf8(out).unwrap(), "49\n");
    let error = result.unwrap_err();
    assert_eq!(error.get_impl(), &ErrorImpl::RecursionLimitExceeded { limit: 50 });
    assert_eq!(error.to_string(), "RuntimeError: maximum call depth of 50 exceeded at line 3");
}

#[test]
fn test_unbounded_recursion_is_runtime_error() {
    let error = runtime_error("fn forever(n: number) -> number { return forever(n + 1); }\nforever(0);");

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::RecursionLimitExceeded { .. }
    ));
}
