//! Tracing subscriber setup.
//!
//! Logs go to stderr so they never mix with the report on stdout. `RUST_LOG`
//! wins when set; otherwise the level follows the `-v` count.

use tracing_subscriber::{EnvFilter, fmt};

/// Default filter directive for a given `-v` count.
pub fn filter_for(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber. Calling it twice is harmless.
pub fn init(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_for(verbose)));

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
