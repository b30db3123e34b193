//! Logging setup.
//!
//! Everything in the crate logs through `tracing`. The binary installs a
//! formatting subscriber once at startup; library users bring their own.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT_ONCE: Once = Once::new();

/// Install the global subscriber.
///
/// `RUST_LOG` wins if set; otherwise `default_directive` is used, e.g.
/// `"warn"` or `"skirmish=debug"`. Output goes to stderr so stdout stays
/// clean for results. Later calls are no-ops.
pub fn init(default_directive: &str) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        // Ignore the error if another subscriber is already installed.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
