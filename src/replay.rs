//! Event stream replay
//!
//! Reads a JSON Lines event stream and dispatches each event to a
//! `Reporter`, in the order the engine emitted them.

use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::event::{parse_event, ReporterEvent};
use crate::report::Reporter;

/// What happened while replaying a stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    /// Events handed to the reporter
    pub delivered: usize,
    /// Non-blank lines that couldn't be parsed
    pub skipped: usize,
    /// Events with an unrecognized type
    pub unknown: usize,
    /// Failed test count from the last `run_complete` event, if any arrived
    pub failed_tests: Option<u64>,
}

impl ReplayOutcome {
    /// Whether the run finished without failed tests.
    ///
    /// A stream that never completed counts as successful; there is no
    /// failure to report.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !matches!(self.failed_tests, Some(failed) if failed > 0)
    }
}

/// Replay every event from `reader` into `reporter`.
///
/// Malformed lines are logged and skipped. Read errors and reporter write
/// errors stop the replay.
pub fn replay<R: BufRead>(reader: R, reporter: &mut dyn Reporter) -> Result<ReplayOutcome> {
    let mut outcome = ReplayOutcome::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("Failed to read event stream at line {line_no}"))?;

        let event = match parse_event(&line) {
            Ok(Some(event)) => event,
            Ok(None) => continue,
            Err(e) => {
                warn!("Skipping line {line_no}: {e:#}");
                outcome.skipped += 1;
                continue;
            }
        };

        debug!(line = line_no, kind = event.kind(), "event");

        let written = match &event {
            ReporterEvent::RunStart(info) => reporter.on_run_start(info),
            ReporterEvent::TestResult(result) => reporter.on_test_result(result),
            ReporterEvent::RunComplete(summary) => {
                outcome.failed_tests = Some(summary.failed_count);
                reporter.on_run_complete(summary)
            }
            ReporterEvent::Unknown { event_type } => {
                debug!("Ignoring unknown event type '{event_type}' at line {line_no}");
                outcome.unknown += 1;
                continue;
            }
        };
        written.with_context(|| format!("Failed to write report for '{}' event", event.kind()))?;

        outcome.delivered += 1;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{RunStartInfo, RunSummary, TestFileResult};
    use std::io::{self, Cursor};

    /// Records which handlers were called, in order
    #[derive(Default)]
    struct Recorder {
        calls: Vec<String>,
    }

    impl Reporter for Recorder {
        fn on_run_start(&mut self, info: &RunStartInfo) -> io::Result<()> {
            self.calls.push(format!("start {}", info.total_suite_count));
            Ok(())
        }

        fn on_test_result(&mut self, result: &TestFileResult) -> io::Result<()> {
            self.calls.push(format!("result {}", result.test_results.len()));
            Ok(())
        }

        fn on_run_complete(&mut self, summary: &RunSummary) -> io::Result<()> {
            self.calls.push(format!("complete {}", summary.total_tests));
            Ok(())
        }
    }

    /// A reporter whose sink is gone
    struct BrokenPipe;

    impl Reporter for BrokenPipe {
        fn on_run_start(&mut self, _info: &RunStartInfo) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn on_test_result(&mut self, _result: &TestFileResult) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn on_run_complete(&mut self, _summary: &RunSummary) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    const STREAM: &str = r#"{"type":"run_start","numTotalTestSuites":2}
{"type":"test_result","testResults":[{"ancestorTitles":["A"],"title":"one","status":"passed","duration":1}]}

{"type":"test_result","testResults":[{"ancestorTitles":["B"],"title":"two","status":"failed","duration":2},{"ancestorTitles":["B"],"title":"three","status":"pending","duration":null}]}
{"type":"run_complete","numTotalTests":3,"numPassedTests":1,"numFailedTests":1,"numPendingTests":1,"startTime":0,"testResults":[]}
"#;

    #[test]
    fn test_replay_dispatches_in_order() {
        let mut recorder = Recorder::default();
        let outcome = replay(Cursor::new(STREAM), &mut recorder).unwrap();

        assert_eq!(
            recorder.calls,
            vec!["start 2", "result 1", "result 2", "complete 3"]
        );
        assert_eq!(outcome.delivered, 4);
        assert_eq!(outcome.skipped, 0);
        assert_eq!(outcome.failed_tests, Some(1));
        assert!(!outcome.succeeded());
    }

    #[test]
    fn test_replay_skips_malformed_and_unknown_lines() {
        let stream = "not json\n{\"type\":\"heartbeat\"}\n{\"type\":\"run_start\",\"numTotalTestSuites\":1}\n{\"numTotalTestSuites\":1}\n";
        let mut recorder = Recorder::default();
        let outcome = replay(Cursor::new(stream), &mut recorder).unwrap();

        assert_eq!(recorder.calls, vec!["start 1"]);
        assert_eq!(outcome.delivered, 1);
        assert_eq!(outcome.skipped, 2);
        assert_eq!(outcome.unknown, 1);
        assert_eq!(outcome.failed_tests, None);
        assert!(outcome.succeeded());
    }

    #[test]
    fn test_replay_empty_stream() {
        let mut recorder = Recorder::default();
        let outcome = replay(Cursor::new(""), &mut recorder).unwrap();

        assert!(recorder.calls.is_empty());
        assert_eq!(outcome, ReplayOutcome::default());
    }

    #[test]
    fn test_replay_last_summary_wins() {
        let stream = concat!(
            r#"{"type":"run_complete","numTotalTests":1,"numFailedTests":1,"startTime":0}"#,
            "\n",
            r#"{"type":"run_complete","numTotalTests":1,"numFailedTests":0,"startTime":0}"#,
            "\n",
        );
        let mut recorder = Recorder::default();
        let outcome = replay(Cursor::new(stream), &mut recorder).unwrap();

        assert_eq!(outcome.failed_tests, Some(0));
        assert!(outcome.succeeded());
    }

    #[test]
    fn test_replay_stops_on_write_error() {
        let err = replay(Cursor::new(STREAM), &mut BrokenPipe).unwrap_err();
        assert!(err.to_string().contains("run_start"));
    }
}
