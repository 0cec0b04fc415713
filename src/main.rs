//! Kaori command line interface.
//!
//! ```bash
//! # Run a program
//! kaori hello.kr
//!
//! # Run source given on the command line
//! kaori --eval 'print(1 + 2);'
//!
//! # Resolve and type check without running
//! kaori --check hello.kr
//! ```

use std::{fs::read_to_string, io, path::PathBuf, process::ExitCode};

use clap::Parser;
use kaori::{interpreter::interpreter::MAX_CALL_DEPTH, run_with_options, RunOptions};

#[derive(Parser)]
#[command(name = "kaori", version, about = "Interpreter for the Kaori language")]
struct Cli {
    /// Source file to run
    #[arg(required_unless_present = "eval", conflicts_with = "eval")]
    file: Option<PathBuf>,

    /// Run the given source text instead of a file
    #[arg(short, long, value_name = "SOURCE")]
    eval: Option<String>,

    /// Resolve and type check only, without running the program
    #[arg(long, conflicts_with = "no_typecheck")]
    check: bool,

    /// Skip the type checker; rule violations surface as runtime errors
    #[arg(long)]
    no_typecheck: bool,

    /// Maximum number of nested function calls
    #[arg(long, value_name = "N", default_value_t = MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Enable verbose logging (use multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries only program output
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let source = match (&cli.eval, &cli.file) {
        (Some(source), _) => source.clone(),
        (None, Some(path)) => match read_to_string(path) {
            Ok(source) => source,
            Err(error) => {
                eprintln!("error: could not read {}: {}", path.display(), error);
                return ExitCode::from(2);
            }
        },
        (None, None) => {
            eprintln!("error: no input given");
            return ExitCode::from(2);
        }
    };

    let options = RunOptions {
        type_check: !cli.no_typecheck,
        execute: !cli.check,
        max_call_depth: cli.max_call_depth,
    };

    tracing::info!(?options, "running program");

    let stdout = io::stdout();
    match run_with_options(&source, options, stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::from(1)
        }
    }
}
