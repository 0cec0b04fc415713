#![allow(clippy::module_inception)]

use std::io::Write;

use crate::{
    errors::errors::Error,
    interpreter::interpreter::{Interpreter, MAX_CALL_DEPTH},
    lexer::lexer::tokenize,
    parser::parser::parse,
    resolver::resolver::resolve,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod resolver;
pub mod scope;
pub mod type_checker;

extern crate regex;

/// Which phases of the pipeline run after parsing and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Reject ill-typed programs before running them.
    pub type_check: bool,
    /// Execute the program. When off the run stops after checking.
    pub execute: bool,
    /// Nested calls allowed before the run fails with a runtime error.
    pub max_call_depth: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        RunOptions {
            type_check: true,
            execute: true,
            max_call_depth: MAX_CALL_DEPTH,
        }
    }
}

/// Tokenizes, parses, resolves, type checks and runs `source`, writing the
/// program's output to `out`.
pub fn run<W: Write>(source: &str, out: W) -> Result<(), Error> {
    run_with_options(source, RunOptions::default(), out)
}

/// Runs the pipeline with the given phases enabled. The first error from any
/// phase ends the run.
pub fn run_with_options<W: Write>(source: &str, options: RunOptions, out: W) -> Result<(), Error> {
    let tokens = tokenize(source.to_string())?;
    let program = parse(tokens)?;
    let resolutions = resolve(&program)?;

    if options.type_check {
        type_check(&program, &resolutions)?;
    }

    if options.execute {
        Interpreter::new(&resolutions, out)
            .with_max_call_depth(options.max_call_depth)
            .run(&program)?;
    }

    Ok(())
}
