//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `FdError` as one variant
//! via `#[from]`.

use thiserror::Error;

/// The top-level error type for `fd-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FdError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `fd-*` crates.
pub type FdResult<T> = Result<T, FdError>;
