//! Type system definitions for the AST.
//!
//! This module defines the closed set of static types:
//!
//! - Primitive types (numbers, strings, booleans)
//! - Function types (ordered parameter types and a return type)
//! - `Void`, the return type of procedures and the marker for "no value"
//!
//! Types appear in declarations as written by the user and are compared
//! structurally by the type checker.

use std::fmt::Display;

/// Static type of an expression or declaration.
///
/// Equality is structural: two function types are equal when their parameter
/// lists and return types are pairwise equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Number,
    Boolean,
    String,
    Void,
    Function(FunctionType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionType {
    pub parameters: Vec<Type>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(parameters: Vec<Type>, return_type: Type) -> Self {
        FunctionType {
            parameters,
            return_type: Box::new(return_type),
        }
    }
}

impl Type {
    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void)
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::Boolean => write!(f, "bool"),
            Type::String => write!(f, "string"),
            Type::Void => write!(f, "void"),
            Type::Function(function) => write!(f, "{}", function),
        }
    }
}

impl Display for FunctionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parameters = self
            .parameters
            .iter()
            .map(Type::to_string)
            .collect::<Vec<String>>()
            .join(", ");

        if self.return_type.is_void() {
            write!(f, "fn({})", parameters)
        } else {
            write!(f, "fn({}) -> {}", parameters, self.return_type)
        }
    }
}
