//! Diagnostic logging for the phptag CLI
//!
//! Logs go to stderr so the rewritten source on stdout stays clean.
//! Filtering follows the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=phptag_fixer=trace` - crate-level filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize the tracing subscriber
///
/// RUST_LOG wins when set. Otherwise the level is `warn`, or `debug`
/// with `verbose`.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(verbose)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
