//! spec-reporter - spec-style console output for test runs
//!
//! Consumes the lifecycle events a test engine emits (run start, one result
//! per test file, run complete) and renders them as one line per test, a
//! pass/fail/pending tally, and the run's elapsed time.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod event;
pub mod logging;
pub mod replay;
pub mod report;

// Re-export commonly used types
pub use config::ReporterConfig;
pub use event::{
    parse_event, ReporterEvent, RunStartInfo, RunSummary, SuiteResult, TestFileResult, TestStatus,
};
pub use replay::{replay, ReplayOutcome};
pub use report::{Clock, FixedClock, Palette, Reporter, SpecReporter, SystemClock};
