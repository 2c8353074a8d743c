//! Test-run event payloads
//!
//! Typed, immutable snapshots of what the test engine reports at run start,
//! after each test file, and at run completion. Field names on the wire
//! follow the engine's reporter payloads (`numTotalTestSuites`,
//! `ancestorTitles`, ...).

pub mod stream;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use stream::{parse_event, ReporterEvent};

/// Outcome of a single test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TestStatus {
    /// The test passed
    Passed,
    /// The test failed, or reported a status this reporter does not know
    Failed,
    /// The test was skipped or marked pending
    Pending,
}

impl TestStatus {
    /// Map an engine status string onto a variant.
    ///
    /// Anything other than `passed` or `pending` is rendered as a failure,
    /// including `skipped`, `todo` and `disabled`.
    #[must_use]
    pub fn from_engine(status: &str) -> Self {
        match status {
            "passed" => Self::Passed,
            "pending" => Self::Pending,
            _ => Self::Failed,
        }
    }

    /// The single-character glyph shown in front of a result
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Passed => "✔",
            Self::Failed => "✘",
            Self::Pending => "○",
        }
    }
}

impl From<String> for TestStatus {
    fn from(status: String) -> Self {
        Self::from_engine(&status)
    }
}

/// Delivered once when the engine starts a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStartInfo {
    /// Number of test files the engine discovered
    #[serde(rename = "numTotalTestSuites", default)]
    pub total_suite_count: u64,
}

/// Result of one test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    /// Titles of the enclosing `describe` blocks, outermost first
    #[serde(default, deserialize_with = "null_as_default")]
    pub ancestor_titles: Vec<String>,
    /// The test's own title
    pub title: String,
    /// Pass/fail/pending outcome
    pub status: TestStatus,
    /// Wall time spent in the test; engines report `null` for pending tests
    // `null` renders as `(0ms)` rather than echoing the raw value.
    #[serde(rename = "duration", default, deserialize_with = "null_as_default")]
    pub duration_millis: u64,
}

/// Results for one test file, delivered as the file completes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestFileResult {
    /// Individual test outcomes in execution order
    #[serde(default)]
    pub test_results: Vec<SuiteResult>,
    /// Pre-formatted failure report for the file, if anything failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_message: Option<String>,
}

/// Aggregate results delivered once at the end of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Number of test cases in the run
    #[serde(rename = "numTotalTests", default)]
    pub total_tests: u64,
    /// Number of passing test cases
    #[serde(rename = "numPassedTests", default)]
    pub passed_count: u64,
    /// Number of failing test cases
    #[serde(rename = "numFailedTests", default)]
    pub failed_count: u64,
    /// Number of pending test cases
    #[serde(rename = "numPendingTests", default)]
    pub pending_count: u64,
    /// When the engine started the run (epoch millis or RFC 3339 on the wire)
    #[serde(rename = "startTime", deserialize_with = "start_time::deserialize")]
    pub start_time: DateTime<Utc>,
    /// Per-file results in the order the engine finished them
    #[serde(rename = "testResults", default)]
    pub test_results: Vec<TestFileResult>,
}

impl RunSummary {
    /// One failure message per test file, empty when the file had none.
    pub fn failure_messages(&self) -> impl Iterator<Item = &str> {
        self.test_results
            .iter()
            .map(|file| file.failure_message.as_deref().unwrap_or(""))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

mod start_time {
    use chrono::{DateTime, Utc};
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawInstant {
        Millis(i64),
        Text(String),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawInstant::deserialize(deserializer)? {
            RawInstant::Millis(ms) => DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| D::Error::custom(format!("startTime out of range: {ms}"))),
            RawInstant::Text(text) => DateTime::parse_from_rfc3339(&text)
                .map(|t| t.with_timezone(&Utc))
                .map_err(|e| D::Error::custom(format!("invalid startTime '{text}': {e}"))),
        }
    }
}
