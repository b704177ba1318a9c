//! Diagnostic logging setup.
//!
//! Library code emits `tracing` events; the binary installs a subscriber that
//! writes them to stderr. `FLOWMAP_LOG` takes an `EnvFilter` directive and
//! wins over the `-v` count.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "FLOWMAP_LOG";

/// Filter directive for a given number of `-v` flags.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "flowmap=warn",
        1 => "flowmap=info",
        2 => "flowmap=debug",
        _ => "flowmap=trace",
    }
}

/// Install the global subscriber. Later calls are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
