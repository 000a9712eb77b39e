//! The testbuilder Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::path::Path;
use std::process;

use clap::Parser;
use tracing::Level;

use crate::cli::args::{BuilderArgs, Command};
use crate::cli::output::OutputConfig;
use crate::counter::CombinationCounter;
use crate::diagnostics::{BuilderError, Result};
use crate::layout::StageLayout;
use crate::plan::TestPlan;
use crate::registry::StageRegistry;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = BuilderArgs::parse();
    init_logging(args.verbose);

    let mut config = OutputConfig::default();
    if args.no_color {
        config.use_colors = false;
    }

    if let Err(e) = dispatch(args.command, &config) {
        output::print_error(e);
        process::exit(1);
    }
}

/// Runs a single subcommand.
pub fn dispatch(command: Command, config: &OutputConfig) -> Result<()> {
    match command {
        Command::Labels { radices } => {
            let counter = CombinationCounter::new(radices)?;
            output::print_labels(config, counter).map_err(stdout_error)
        }
        Command::Plan { file, json } => {
            let plan = load_plan(&file)?;
            if json {
                println!("{}", plan.to_json()?);
                return Ok(());
            }
            output::print_plan(config, &plan).map_err(stdout_error)
        }
        Command::Count { file } => {
            let plan = load_plan(&file)?;
            output::print_counts(config, &plan).map_err(stdout_error)
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn load_plan(file: &Path) -> Result<TestPlan> {
    let layout = StageLayout::load(file)?;
    let registry: StageRegistry<(), (), ()> = layout.to_registry();
    Ok(registry.plan())
}

fn stdout_error(source: std::io::Error) -> BuilderError {
    BuilderError::Io {
        path: "<stdout>".into(),
        source,
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
