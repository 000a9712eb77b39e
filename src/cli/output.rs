//! Handles all user-facing output for the CLI.
//!
//! Plans and labels go to stdout, optionally coloured; errors are rendered as
//! `miette` reports on stderr.

use std::io::{self, Write};

use miette::Report;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::counter::CombinationCounter;
use crate::diagnostics::BuilderError;
use crate::plan::TestPlan;

/// Configuration for CLI rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    pub use_colors: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
        }
    }
}

impl OutputConfig {
    fn stdout(&self) -> StandardStream {
        let choice = if self.use_colors {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        };
        StandardStream::stdout(choice)
    }
}

/// Prints every label of `counter`, one per line, starting from its current tuple.
pub fn print_labels(config: &OutputConfig, mut counter: CombinationCounter) -> io::Result<()> {
    let mut stdout = config.stdout();
    loop {
        writeln!(stdout, "{counter}")?;
        if counter.advance() {
            return Ok(());
        }
    }
}

/// Prints plan names; the label part is highlighted.
pub fn print_plan(config: &OutputConfig, plan: &TestPlan) -> io::Result<()> {
    write_plan(&mut config.stdout(), plan)
}

fn write_plan(out: &mut impl WriteColor, plan: &TestPlan) -> io::Result<()> {
    if plan.is_empty() {
        writeln!(out, "  No tests generated.")?;
        return Ok(());
    }

    for entry in &plan.tests {
        let prefix = entry
            .label
            .as_ref()
            .and_then(|_| entry.name.strip_suffix(entry.base_name.as_str()))
            .filter(|prefix| !prefix.is_empty());
        let Some(prefix) = prefix else {
            writeln!(out, "{}", entry.name)?;
            continue;
        };
        out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        write!(out, "{prefix}")?;
        out.reset()?;
        writeln!(out, "{}", entry.base_name)?;
    }
    Ok(())
}

pub fn print_counts(config: &OutputConfig, plan: &TestPlan) -> io::Result<()> {
    let mut stdout = config.stdout();
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "paths:")?;
    stdout.reset()?;
    writeln!(stdout, " {}", plan.paths)?;
    stdout.set_color(ColorSpec::new().set_bold(true))?;
    write!(stdout, "tests:")?;
    stdout.reset()?;
    writeln!(stdout, " {}", plan.len())
}

pub fn print_error(error: BuilderError) {
    let report = Report::new(error);
    eprintln!("{report:?}");
}
