//! # Tracing Setup
//!
//! ## Log Levels
//! - `RUST_LOG=debug` - Show debug messages everywhere
//! - `RUST_LOG=prism_session=trace` - Trace the session only
//! - Default: [`DEFAULT_LOG_FILTER`], or `[logging] filter` from the config

use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str =
    "info,prism_core=debug,prism_store=debug,prism_session=debug,sqlx=warn";

/// Installs the global `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `filter`. Returns false if a global
/// subscriber was already installed (e.g. by another test).
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok()
}
