//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with an `EnvFilter`.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set. Safe to
/// call more than once; later calls are no-ops.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stylehub_storefront=info".into());

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
