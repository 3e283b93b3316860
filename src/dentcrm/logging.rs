//! Tracing setup for binaries. The library itself only emits events.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is not set.
pub fn default_level(verbose: bool) -> &'static str {
    if verbose {
        "dentcrm=debug"
    } else {
        "warn"
    }
}

/// Initialize the tracing subscriber. `RUST_LOG` overrides `default_level`.
///
/// Output goes to stderr so it never mixes with rendered tables on stdout.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
