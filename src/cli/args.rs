//! Defines the command-line arguments and subcommands for the testbuilder CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "testbuilder",
    version,
    about = "Preview combinatorial test plans built from staged setup alternatives."
)]
pub struct BuilderArgs {
    /// Increase log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable coloured output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every combination label for the given radices, in enumeration order.
    Labels {
        /// Number of alternatives per stage.
        #[arg(required = true)]
        radices: Vec<usize>,
    },
    /// Print the generated test names for a stage layout file.
    Plan {
        /// The path to a YAML or JSON stage layout.
        #[arg(required = true)]
        file: PathBuf,
        /// Emit the full plan as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print how many paths and tests a stage layout generates.
    Count {
        /// The path to a YAML or JSON stage layout.
        #[arg(required = true)]
        file: PathBuf,
    },
}
