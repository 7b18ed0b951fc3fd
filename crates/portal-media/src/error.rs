//! Top-level error type for portal-media.

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for portal-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the portal's construction and gallery listing.
///
/// Upload and delete failures are deliberately *not* here: they are
/// reported through [`UploadOutcome`](crate::UploadOutcome) and
/// [`DeleteOutcome`](crate::DeleteOutcome) so their user-facing messages
/// stay attached to the workflow that produced them.
#[derive(Debug, Error)]
pub enum Error {
    /// Session configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The container client failed.
    #[error(transparent)]
    Object(#[from] portal_object::error::Error),
    /// The metadata client could not be constructed.
    #[error(transparent)]
    Metadata(#[from] portal_metadata::Error),
}
