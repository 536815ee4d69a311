//! Tracing subscriber setup.
//!
//! Library code emits `tracing` events (saved files, skipped records, backups
//! pruned). Outside debug mode only errors reach the terminal, since the
//! `msg_*!` macros already tell the user what happened; with `TASKVAULT_DEBUG`
//! the default level drops to `debug`, and `RUST_LOG` overrides both.

use crate::libs::messages::macros::is_debug_mode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter outside debug mode.
const QUIET_FILTER: &str = "error";

/// Default filter when `TASKVAULT_DEBUG` is set.
const DEBUG_FILTER: &str = "taskvault=debug";

/// Installs the global subscriber. Calling it twice is harmless.
pub fn init() {
    let default = if is_debug_mode() { DEBUG_FILTER } else { QUIET_FILTER };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
