//! Diagnostic logging setup.
//!
//! Operator-facing diagnostics go through `tracing` to stderr; the
//! styled messages in `cli::output` are for the user.  `RUST_LOG`
//! overrides the level picked from `-v` flags.

use tracing_subscriber::EnvFilter;

/// Map the number of `-v` flags to a default filter directive.
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Install the global subscriber.  Safe to call more than once.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
