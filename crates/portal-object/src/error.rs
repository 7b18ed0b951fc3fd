//! Minimal error type for container operations.

use thiserror::Error;

/// Result type alias for container operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised by the container client or a connector.
///
/// The portal surfaces store failures to the user verbatim, so every
/// variant keeps the underlying message intact.
#[derive(Debug, Error)]
pub enum Error {
    /// The connector could not produce a working store from its credentials.
    #[error("container connection failed: {0}")]
    Connection(String),

    /// The named object does not exist in the container.
    #[error("object `{0}` not found in the container")]
    NotFound(String),

    /// Any other store failure.
    #[error("{0}")]
    Store(#[source] object_store::Error),
}

impl Error {
    /// Map a raw [`object_store::Error`], attributing it to `key`.
    pub(crate) fn from_store(err: object_store::Error, key: &str) -> Self {
        match err {
            object_store::Error::NotFound { .. } => Self::NotFound(key.to_string()),
            other => Self::Store(other),
        }
    }
}
