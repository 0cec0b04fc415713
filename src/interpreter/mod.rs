//! Tree-walking interpreter module.
//!
//! Executes a resolved program against a `ScopeStack<Value>`:
//!
//! - Blocks and loop bodies run in a fresh frame popped on exit
//! - Calls run in a frame whose parent is the frame the function was
//!   declared in, which gives closures their lexical environment
//! - `print` writes the value's text form to the configured output
//! - Call depth is capped, and the native stack grows on demand below the cap
//!
//! Operations the type checker would have rejected surface here as runtime
//! errors when checking is skipped.

pub mod interpreter;
mod stack;
pub mod value;

#[cfg(test)]
mod tests;
