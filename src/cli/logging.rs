//! Tracing subscriber setup

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter for short-lived commands
pub const QUIET_FILTER: &str = "warn";

/// Default filter for the long-running relay
pub const RELAY_FILTER: &str = "info";

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins over `default_filter` when set. Safe to call twice.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
