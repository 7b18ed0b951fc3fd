#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Session configuration read once from the environment.
pub mod config;
mod error;
/// Gallery listing, classification, lightbox, and deletion.
pub mod gallery;
/// Local media files, key sanitization, and kind classification.
pub mod media;
/// The portal facade tying upload completion to a gallery refresh.
pub mod portal;
/// Preview handles with deterministic release.
pub mod preview;
/// Sequential upload-then-register workflow.
pub mod uploader;

#[cfg(any(test, feature = "test-utils"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-utils")))]
pub mod testing;

pub use crate::config::PortalConfig;
pub use crate::error::{Error, Result};
pub use crate::gallery::{DeleteOutcome, Gallery, GalleryEntry, Lightbox};
pub use crate::media::{MediaFile, MediaKind};
pub use crate::portal::Portal;
pub use crate::preview::{Preview, PreviewRegistry};
pub use crate::uploader::{UploadOutcome, UploadReport, Uploader};

#[doc(hidden)]
pub mod prelude;
