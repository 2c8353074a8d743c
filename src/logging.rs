//! Diagnostic logging
//!
//! Diagnostics go to stderr through `tracing` so the report on stdout can be
//! piped or captured untouched.

use tracing_subscriber::EnvFilter;

/// Filter directive for the given verbosity
#[must_use]
pub const fn filter_directive(verbose: bool) -> &'static str {
    if verbose {
        "spec_reporter=debug,warn"
    } else {
        "warn"
    }
}

/// Install the global stderr subscriber.
///
/// Safe to call more than once; later calls are ignored.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_env_filter(EnvFilter::new(filter_directive(verbose)))
        .try_init();
}
