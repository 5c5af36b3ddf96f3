//! Log output for hosts that do not install a subscriber of their own.

use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `directive` (for example
/// `"info"` or `"barrels_core=debug"`), and forwards `log` records to it.
///
/// `RUST_LOG` overrides `directive` when set. Returns false if a global
/// subscriber is already installed, in which case nothing changes.
pub fn init(directive: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        return false;
    }

    if let Err(err) = LogTracer::init() {
        tracing::warn!("Failed to forward log records: {err}");
    }
    true
}
