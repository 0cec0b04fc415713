use std::fmt::Display;

use crate::{
    ast::statements::{Block, FnDecl},
    scope::scope_stack::FrameRef,
};

/// Runtime value.
///
/// Values borrow function declarations from the program being run, so they
/// never outlive it.
#[derive(Debug, Clone)]
pub enum Value<'a> {
    Number(f64),
    Boolean(bool),
    String(String),
    Function(Closure<'a>),
    /// Result of calling a function declared without a return type.
    Void,
}

/// A defined function together with the frame it was declared in.
///
/// Forward declarations never become closures, so the body is always present.
/// Holding `frame` keeps the declaring frame alive; a closure bound in the
/// frame it captures forms an `Rc` cycle that is never collected.
#[derive(Debug, Clone)]
pub struct Closure<'a> {
    pub declaration: &'a FnDecl,
    pub body: &'a Block,
    pub frame: FrameRef<Value<'a>>,
}

impl<'a> Closure<'a> {
    pub fn name(&self) -> &str {
        &self.declaration.identifier.name
    }
}

impl Value<'_> {
    /// Name of the value's kind, used in runtime error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Boolean(_) => "bool",
            Value::String(_) => "string",
            Value::Function(_) => "function",
            Value::Void => "void",
        }
    }
}

impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(left), Value::Number(right)) => left == right,
            (Value::Boolean(left), Value::Boolean(right)) => left == right,
            (Value::String(left), Value::String(right)) => left == right,
            (Value::Function(left), Value::Function(right)) => {
                std::ptr::eq(left.declaration, right.declaration) && left.frame.ptr_eq(&right.frame)
            }
            (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(number) => write!(f, "{}", number),
            Value::Boolean(boolean) => write!(f, "{}", boolean),
            Value::String(string) => write!(f, "{}", string),
            Value::Function(closure) => write!(f, "<fn {}>", closure.name()),
            Value::Void => write!(f, "void"),
        }
    }
}
