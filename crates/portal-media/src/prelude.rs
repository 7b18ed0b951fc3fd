//! Convenience re-exports.

pub use crate::config::PortalConfig;
pub use crate::error::Error;
pub use crate::gallery::{DeleteOutcome, Gallery, GalleryEntry, Lightbox};
pub use crate::media::{MediaFile, MediaKind};
pub use crate::portal::Portal;
pub use crate::uploader::{UploadOutcome, UploadReport, Uploader};
