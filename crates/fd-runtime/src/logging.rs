//! Structured logging setup.
//!
//! The library crates only emit `tracing` events; installing a subscriber is
//! the application's choice.  The level comes from `RUST_LOG` and defaults to
//! `info`.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// `RUST_LOG` if set and valid, else [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Human-readable output to stderr.
///
/// # Panics
///
/// If a global subscriber is already installed.
pub fn init() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .init();
}

/// One JSON object per line, for log aggregation.
///
/// # Panics
///
/// If a global subscriber is already installed.
pub fn init_json() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().json().with_target(true).with_writer(std::io::stderr))
        .init();
}
