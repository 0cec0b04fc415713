//! Lexical scope storage shared by the type checker and the interpreter.
//!
//! A [`scope_stack::ScopeStack`] is a chain of frames addressed by
//! `(distance, slot)` pairs. It is instantiated with static types while
//! checking and with runtime values while executing.

pub mod scope_stack;
