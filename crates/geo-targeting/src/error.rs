//! Geo-targeting error types.
//!
//! Matching itself never fails; these cover loading configuration and files.

use thiserror::Error;

/// Errors that can occur while loading targeting inputs.
#[derive(Debug, Error)]
pub enum GeoTargetingError {
    /// Reading a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON document could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment variable held an unusable value.
    #[error("invalid config {key}: {value}")]
    Config { key: &'static str, value: String },
}

/// Result type for geo-targeting operations.
pub type Result<T> = std::result::Result<T, GeoTargetingError>;
