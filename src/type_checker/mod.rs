//! Type checking module.
//!
//! This module validates a resolved program before it runs:
//!
//! - Verifying operand types for every operator
//! - Checking declarations and assignments against declared types
//! - Checking call arguments against function parameter types
//! - Checking conditions are booleans and returns match the function
//!
//! Types live in a `ScopeStack<Type>` that is pushed and popped exactly where
//! the interpreter pushes and pops its value frames, and every lookup goes
//! through the address the resolver recorded.

pub mod type_checker;
