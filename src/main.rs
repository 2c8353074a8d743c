//! spec-reporter - spec-style console output for test runs
//!
//! CLI entry point: replays a JSON Lines event stream through the reporter.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use spec_reporter::{logging, replay, Palette, ReporterConfig, SpecReporter};

/// Render test-run events as spec-style console output
///
/// Reads one JSON event per line (`run_start`, `test_result`,
/// `run_complete`) and prints a line per test followed by a tally.
#[derive(Parser, Debug)]
#[command(name = "spec-reporter", version, about)]
struct Cli {
    /// Event stream to render ("-" or omitted reads stdin)
    events: Option<PathBuf>,

    /// TOML file with [global] and [reporter] tables passed to the reporter
    #[arg(long)]
    config: Option<PathBuf>,

    /// When to use colored output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Log diagnostics to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Color output mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Color when the terminal supports it
    Auto,
    /// Always emit ANSI escapes
    Always,
    /// Never emit ANSI escapes
    Never,
}

/// Pick the palette for a color mode, forcing escapes on for `Always`.
fn palette_for(choice: ColorChoice) -> Palette {
    match choice {
        ColorChoice::Auto => Palette::ansi(),
        ColorChoice::Always => {
            colored::control::set_override(true);
            Palette::ansi()
        }
        ColorChoice::Never => Palette::plain(),
    }
}

/// Open the event source, treating `-` and no path as stdin.
fn open_events(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(p) if p == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(p) => {
            let file = File::open(p)
                .with_context(|| format!("Failed to open event stream: {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = match &cli.config {
        Some(path) => ReporterConfig::from_path(path)?,
        None => ReporterConfig::default(),
    };
    debug!(
        global_keys = config.global.len(),
        option_keys = config.options.len(),
        "loaded reporter config"
    );

    let reader = open_events(cli.events.as_deref())?;
    let mut reporter = SpecReporter::stdout(config, palette_for(cli.color));
    let outcome = replay(reader, &mut reporter)?;

    info!(
        delivered = outcome.delivered,
        skipped = outcome.skipped,
        unknown = outcome.unknown,
        "replay finished"
    );

    // Exit with appropriate code
    if outcome.succeeded() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
