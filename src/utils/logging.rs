//! Logging setup
//!
//! The library only emits `tracing` events; binaries and demos call
//! [`setup_logging`] once to install a subscriber.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Setup logging with the specified level.
///
/// `RUST_LOG` takes precedence over `level` when set. Calling this twice is
/// harmless: the second subscriber is silently ignored.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .with(filter)
        .try_init()
        .ok();
}
