//! Spec-style run renderer
//!
//! Renders lifecycle events as one line per test, a tally, and the run's
//! elapsed time:
//!
//! ```text
//! Found 2 test suites
//!     ✔ Math > Addition > adds two numbers (12ms)
//!     ○ Math > Division > divides by zero (0ms)
//! Ran 2 tests in 1.204 s
//! ✔ 1 passing
//! ○ 1 pending
//! ```

use std::io::{self, Stdout, Write};

use chrono::{DateTime, Duration, Utc};

use super::clock::{Clock, SystemClock};
use super::style::Palette;
use super::Reporter;
use crate::config::ReporterConfig;
use crate::event::{RunStartInfo, RunSummary, SuiteResult, TestFileResult, TestStatus};

/// Writes spec-style output for a test run
pub struct SpecReporter<W, C = SystemClock> {
    out: W,
    config: ReporterConfig,
    palette: Palette,
    clock: C,
}

impl SpecReporter<Stdout> {
    /// Reporter writing to stdout against the wall clock
    #[must_use]
    pub fn stdout(config: ReporterConfig, palette: Palette) -> Self {
        Self::new(io::stdout(), config, palette, SystemClock)
    }
}

impl<W: Write, C: Clock> SpecReporter<W, C> {
    /// Create a reporter over an arbitrary sink
    pub const fn new(out: W, config: ReporterConfig, palette: Palette, clock: C) -> Self {
        Self {
            out,
            config,
            palette,
            clock,
        }
    }

    /// Configuration handed over by the host; never interpreted here
    #[must_use]
    pub const fn config(&self) -> &ReporterConfig {
        &self.config
    }

    /// Consume the reporter and return its sink
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

impl<W: Write, C: Clock> Reporter for SpecReporter<W, C> {
    fn on_run_start(&mut self, info: &RunStartInfo) -> io::Result<()> {
        let lines = run_start_lines(&self.palette, info);
        self.write_lines(&lines)
    }

    fn on_test_result(&mut self, result: &TestFileResult) -> io::Result<()> {
        let lines: Vec<String> = result
            .test_results
            .iter()
            .map(|test| suite_line(&self.palette, test))
            .collect();
        self.write_lines(&lines)
    }

    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
        let lines = run_complete_lines(&self.palette, summary, self.clock.now());
        self.write_lines(&lines)
    }
}

/// Lines announcing the start of a run: a blank line, then the suite count
#[must_use]
pub fn run_start_lines(palette: &Palette, info: &RunStartInfo) -> Vec<String> {
    vec![
        String::new(),
        (palette.info)(&format!("Found {} test suites", info.total_suite_count)),
    ]
}

/// One indented line for a single test result
#[must_use]
pub fn suite_line(palette: &Palette, result: &SuiteResult) -> String {
    let style = palette.for_status(result.status);
    let head = format!("{} >", result.ancestor_titles.join(" > "));
    format!(
        "    {} {} {} {}",
        style.painted_glyph(),
        (style.head)(&head),
        (style.title)(&result.title),
        (palette.duration)(&format!("({}ms)", result.duration_millis)),
    )
}

/// Failure messages, elapsed time and the non-zero tallies
#[must_use]
pub fn run_complete_lines(
    palette: &Palette,
    summary: &RunSummary,
    now: DateTime<Utc>,
) -> Vec<String> {
    let mut lines: Vec<String> = summary
        .failure_messages()
        .filter(|message| !message.is_empty())
        .map(str::to_string)
        .collect();

    lines.push((palette.info)(&format!(
        "Ran {} tests in {}",
        summary.total_tests,
        format_elapsed(now - summary.start_time)
    )));

    let tallies = [
        (TestStatus::Passed, summary.passed_count, "passing"),
        (TestStatus::Failed, summary.failed_count, "failing"),
        (TestStatus::Pending, summary.pending_count, "pending"),
    ];
    for (status, count, label) in tallies {
        if count == 0 {
            continue;
        }
        let style = palette.for_status(status);
        lines.push(format!(
            "{}{}",
            style.painted_glyph(),
            (style.tone)(&format!(" {count} {label}"))
        ));
    }

    lines
}

/// Format an elapsed duration as `{seconds}.{millis} s`.
///
/// Both parts are components of the duration: seconds wrap at each minute
/// (75.3s renders as `15.300 s`) and the millisecond remainder is printed
/// as a plain integer, so 2.007s renders as `2.7 s` and 2.070s as `2.70 s`.
/// Negative durations clamp to zero.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.num_milliseconds().max(0);
    format!("{}.{} s", (millis / 1000) % 60, millis % 1000)
}
