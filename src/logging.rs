//! Tracing subscriber setup.
//!
//! Log lines go to stderr so command output on stdout stays clean. The
//! filter comes from `RUST_LOG` when set, otherwise from the caller's
//! default directive.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Later calls are ignored.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
