// src/diagnostics.rs
// Tracing bootstrap, called once at process start

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. The debug flag widens this crate's
/// filter; `RUST_LOG` still wins when set. Logging never feeds back into
/// the pipeline's return values.
pub fn init(debug: bool) {
    let default_filter = if debug {
        "dream_painter=debug,info"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    // Ignore the error when a subscriber is already installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
