//! Tracing subscriber setup for binaries embedding the service.

use tracing_subscriber::EnvFilter;

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "audiofile_service=info,audiofile_server=info,tower_http=info";

/// Install a fmt subscriber filtered by `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Returns `false` when a global subscriber was already set.
pub fn init_tracing() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt().with_env_filter(filter).try_init().is_ok()
}
