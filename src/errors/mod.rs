//! Error types and error handling for the interpreter.
//!
//! This module defines the single error type shared by every phase:
//!
//! - A line-tagged `Error` wrapping a specific `ErrorImpl` failure
//! - `ErrorKind`, the four-way taxonomy (syntax, resolve, type, runtime)
//! - Rendering as `<Kind>Error: <message> at line <N>`

pub mod errors;

#[cfg(test)]
mod tests;
