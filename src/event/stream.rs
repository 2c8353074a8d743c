//! JSON Lines parser for test-engine events
//!
//! Each line is one JSON object tagged by a `type` field, with the event
//! payload's fields alongside it:
//!
//! ```text
//! {"type":"run_start","numTotalTestSuites":3}
//! {"type":"test_result","testResults":[{"ancestorTitles":["Math"],"title":"adds","status":"passed","duration":4}]}
//! {"type":"run_complete","numTotalTests":1,"numPassedTests":1,"startTime":1700000000000,"testResults":[]}
//! ```

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{RunStartInfo, RunSummary, TestFileResult};

/// A parsed event from the engine's event stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReporterEvent {
    /// The run is starting
    RunStart(RunStartInfo),
    /// A test file finished
    TestResult(TestFileResult),
    /// The run finished
    RunComplete(RunSummary),
    /// Unrecognized event type
    Unknown {
        /// The raw event type string
        event_type: String,
    },
}

impl ReporterEvent {
    /// Wire name of the event type
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::RunStart(_) => "run_start",
            Self::TestResult(_) => "test_result",
            Self::RunComplete(_) => "run_complete",
            Self::Unknown { event_type } => event_type,
        }
    }
}

/// Parse a single line of the event stream.
///
/// Returns `Ok(None)` for blank lines. Invalid JSON, a missing `type`, or a
/// payload that doesn't fit its type is an error.
pub fn parse_event(line: &str) -> Result<Option<ReporterEvent>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(line).context("Event is not valid JSON")?;
    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .context("Event has no string 'type' field")?
        .to_string();

    let event = match event_type.as_str() {
        "run_start" => ReporterEvent::RunStart(payload(value, &event_type)?),
        "test_result" => ReporterEvent::TestResult(payload(value, &event_type)?),
        "run_complete" => ReporterEvent::RunComplete(payload(value, &event_type)?),
        _ => ReporterEvent::Unknown { event_type },
    };

    Ok(Some(event))
}

fn payload<T: DeserializeOwned>(value: Value, event_type: &str) -> Result<T> {
    serde_json::from_value(value).with_context(|| format!("Malformed '{event_type}' payload"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::TestStatus;

    #[test]
    fn test_parse_empty_line_returns_none() {
        assert!(parse_event("").unwrap().is_none());
        assert!(parse_event("   \t").unwrap().is_none());
    }

    #[test]
    fn test_parse_invalid_json_is_error() {
        assert!(parse_event("not json").is_err());
        assert!(parse_event("{invalid").is_err());
    }

    #[test]
    fn test_parse_missing_type_is_error() {
        let err = parse_event(r#"{"numTotalTestSuites":3}"#).unwrap_err();
        assert!(err.to_string().contains("'type'"));
    }

    #[test]
    fn test_parse_run_start() {
        let event = parse_event(r#"{"type":"run_start","numTotalTestSuites":3}"#)
            .unwrap()
            .unwrap();

        assert_eq!(
            event,
            ReporterEvent::RunStart(RunStartInfo {
                total_suite_count: 3
            })
        );
        assert_eq!(event.kind(), "run_start");
    }

    #[test]
    fn test_parse_test_result() {
        let line = r#"{"type":"test_result","testFilePath":"/src/math.test.js","testResults":[{"ancestorTitles":["Math","Addition"],"title":"adds two numbers","status":"passed","duration":12},{"ancestorTitles":["Math"],"title":"divides","status":"pending","duration":null}]}"#;
        let event = parse_event(line).unwrap().unwrap();

        match event {
            ReporterEvent::TestResult(file) => {
                assert_eq!(file.test_results.len(), 2);
                assert_eq!(file.test_results[0].title, "adds two numbers");
                assert_eq!(file.test_results[1].status, TestStatus::Pending);
                assert_eq!(file.test_results[1].duration_millis, 0);
                assert!(file.failure_message.is_none());
            }
            other => panic!("Expected TestResult, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_run_complete() {
        let line = r#"{"type":"run_complete","numTotalTests":1,"numPassedTests":0,"numFailedTests":1,"numPendingTests":0,"startTime":1700000000000,"testResults":[{"testResults":[],"failureMessage":"Expected 2 to equal 3"}]}"#;
        let event = parse_event(line).unwrap().unwrap();

        match event {
            ReporterEvent::RunComplete(summary) => {
                assert_eq!(summary.total_tests, 1);
                assert_eq!(summary.failed_count, 1);
                assert_eq!(
                    summary.failure_messages().collect::<Vec<_>>(),
                    vec!["Expected 2 to equal 3"]
                );
            }
            other => panic!("Expected RunComplete, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_malformed_payload_names_the_type() {
        let err = parse_event(r#"{"type":"run_complete","numTotalTests":"many"}"#).unwrap_err();
        assert!(err.to_string().contains("run_complete"));
    }

    #[test]
    fn test_parse_unknown_event_type() {
        let event = parse_event(r#"{"type":"test_case_start","title":"x"}"#)
            .unwrap()
            .unwrap();

        match event {
            ReporterEvent::Unknown { event_type } => assert_eq!(event_type, "test_case_start"),
            other => panic!("Expected Unknown, got {other:?}"),
        }
    }
}
