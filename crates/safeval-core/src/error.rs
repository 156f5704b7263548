//! # Error Types
//!
//! Coercions in this crate never fail: malformed input is absorbed by
//! substituting a fallback or an empty placeholder. The errors defined here
//! cover the remaining cases, which are programmer misuse (a strict lookup
//! without a default) and parsing of configuration or timestamps.

use thiserror::Error;

/// Top-level error type for `safeval-core`.
#[derive(Error, Debug)]
pub enum SafeError {
    /// `strict()` was called on a dictionary built without a default.
    #[error("a `default` must be provided when using `strict()`")]
    MissingDefault,

    /// Fallback configuration could not be parsed.
    #[error("invalid fallback configuration: {0}")]
    InvalidFallbacks(#[from] serde_json::Error),

    /// Timestamp text or epoch value was rejected.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
