//! Logging setup
//!
//! Diagnostics go through `tracing` to stderr so they never mix with the
//! command output printed on stdout. `NOTES_LOG` takes any `EnvFilter`
//! directive and wins over the defaults.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "NOTES_LOG";

/// Default filter directive for a run of the given mode.
pub fn default_directive(verbose: bool, server: bool) -> &'static str {
    match (verbose, server) {
        (true, _) => "wiki_notes=debug,info",
        (false, true) => "wiki_notes=info,warn",
        (false, false) => "warn",
    }
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init_logging(verbose: bool, server: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, server)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
