//! Logging setup for conformance runs
//!
//! The fixture crates log through the `log` facade. Binaries and integration
//! harnesses call one of the initializers below to route those records into a
//! `tracing` subscriber. [`TestRunner`](crate::TestRunner) enters a
//! [`case_span`] around every case, so each record carries the path of the
//! case that produced it.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

const DEFAULT_FILTER: &str = "conformance=info,conformance_glow=info,conformance_ash=info,warn";
const DEV_FILTER: &str = "conformance=debug,conformance_glow=debug,conformance_ash=debug,info";

/// Initialize a tracing subscriber with defaults suited to test runs
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    install(env_or(DEFAULT_FILTER), false);
}

/// Initialize a tracing subscriber with a custom filter
pub fn init_tracing_with_filter(filter: &str) {
    install(EnvFilter::new(filter), false);
}

/// Verbose variant for debugging a single failing case
///
/// Adds source locations and thread ids, and reports how long each case ran
/// when its span closes.
pub fn init_tracing_dev() {
    install(env_or(DEV_FILTER), true);
}

/// Span covering one case of a run, named by its dotted path
pub fn case_span(path: &str) -> tracing::Span {
    tracing::info_span!("case", path = %path)
}

fn env_or(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

fn install(filter: EnvFilter, verbose: bool) {
    let span_events = if verbose {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    // A second initialization (e.g. from several tests) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_span_events(span_events)
        .with_thread_ids(verbose)
        .with_file(verbose)
        .with_line_number(verbose)
        .try_init();
}
