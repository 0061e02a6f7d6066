//! Logging setup for binaries embedding the sync engine.

use tracing_subscriber::{EnvFilter, fmt};

/// Installs a formatted `tracing` subscriber filtered by `RUST_LOG`.
///
/// Falls back to the `info` level when `RUST_LOG` is unset or invalid. A
/// subscriber installed earlier is left in place.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
