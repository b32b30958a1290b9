//! Tracing subscriber setup.
//!
//! Structured logs are only wanted when debugging; in normal use the
//! terminal shows nothing but the messages from the `msg_*` macros.

use super::messages::macros::is_debug_mode;
use tracing_subscriber::EnvFilter;

/// Default filter when debug mode is on but `RUST_LOG` is not set.
const DEFAULT_FILTER: &str = "taskman=debug,reqwest=info";

/// Installs the global `fmt` subscriber if debug mode is on.
pub fn init() {
    if !is_debug_mode() {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    // A subscriber may already be installed (e.g. by an embedding program).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
