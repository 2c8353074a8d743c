//! Console reporting
//!
//! Renders test-run events as spec-style terminal output on stdout.

pub mod clock;
pub mod spec;
pub mod style;

use std::io;

use crate::event::{RunStartInfo, RunSummary, TestFileResult};

pub use clock::{Clock, FixedClock, SystemClock};
pub use spec::{format_elapsed, run_complete_lines, run_start_lines, suite_line, SpecReporter};
pub use style::{Palette, StatusStyle};

/// Subscriber to the test engine's run lifecycle.
///
/// The engine calls these sequentially for a single run. Implementations
/// don't validate ordering.
pub trait Reporter {
    /// Called once before any test file runs
    fn on_run_start(&mut self, info: &RunStartInfo) -> io::Result<()>;

    /// Called as each test file finishes
    fn on_test_result(&mut self, result: &TestFileResult) -> io::Result<()>;

    /// Called once after the whole run
    fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()>;
}
