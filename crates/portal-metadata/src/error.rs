//! Internal error types for portal-metadata.

use thiserror::Error;

/// Result type alias for portal-metadata operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for portal-metadata operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The HTTP client could not be constructed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// The record could not be serialized.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
