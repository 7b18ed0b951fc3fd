//! Gallery listing, classification, lightbox, and deletion.

use portal_object::client::ContainerClient;
use portal_object::container::ContainerAddress;
use portal_object::error::Error as ObjectError;

use crate::media::MediaKind;

/// Tracing target for gallery operations.
pub const TRACING_TARGET: &str = "portal_media::gallery";

/// One listed blob, ready to render.
#[derive(Clone, Debug)]
pub struct GalleryEntry {
    /// Object key, shown as the display name.
    pub name: String,
    /// Display/download URL, token included.
    pub url: String,
    /// Image or video, inferred from the name's suffix only.
    pub kind: MediaKind,
}

/// Lightbox view state.
///
/// Only image entries open the lightbox; videos play inline. This is pure
/// view state — it is never persisted and never affects the listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Lightbox {
    /// No overlay.
    #[default]
    Closed,
    /// Full-viewport overlay showing the image at this URL.
    Showing(String),
}

/// Result of one delete invocation.
#[derive(Debug)]
pub enum DeleteOutcome {
    /// The object was removed and the listing re-fetched.
    Deleted {
        /// The removed key.
        key: String,
    },
    /// The store refused; the listing is unchanged (stale until the next
    /// refresh).
    Failed {
        /// The underlying store error, verbatim.
        error: String,
    },
}

impl DeleteOutcome {
    /// The user-facing status line for this outcome.
    pub fn status_line(&self) -> String {
        match self {
            Self::Deleted { key } => format!("Deleted: {key}"),
            Self::Failed { .. } => "Failed to delete file.".to_string(),
        }
    }
}

/// Lists, previews, and deletes the container's blobs.
///
/// All operations take `&mut self`, so one gallery never interleaves a
/// refresh with a delete. Separate handles over the same container still
/// race exactly as the original's browser tabs did: last response wins.
#[derive(Debug)]
pub struct Gallery {
    store: ContainerClient,
    address: ContainerAddress,
    entries: Vec<GalleryEntry>,
    lightbox: Lightbox,
    error: Option<String>,
}

impl Gallery {
    /// Create a gallery over the given container.
    pub fn new(store: ContainerClient, address: ContainerAddress) -> Self {
        Self {
            store,
            address,
            entries: Vec::new(),
            lightbox: Lightbox::Closed,
            error: None,
        }
    }

    /// The entries from the most recent successful refresh, in the order
    /// the store yielded them.
    pub fn entries(&self) -> &[GalleryEntry] {
        &self.entries
    }

    /// Current lightbox state.
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// The visible error banner, if the last refresh failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Re-fetch the listing, replacing the visible collection wholesale.
    ///
    /// On failure the previous entries are left untouched and a visible
    /// error state is set; an empty gallery is never silently shown for a
    /// failed fetch.
    pub async fn refresh(&mut self) -> Result<&[GalleryEntry], ObjectError> {
        match self.store.list().await {
            Ok(listed) => {
                self.entries = listed
                    .into_iter()
                    .map(|meta| {
                        let name = meta.location.to_string();
                        GalleryEntry {
                            url: self.address.content_url(&name),
                            kind: MediaKind::from_name(&name),
                            name,
                        }
                    })
                    .collect();
                self.error = None;
                tracing::debug!(
                    target: TRACING_TARGET,
                    entries = self.entries.len(),
                    "Gallery refreshed"
                );
                Ok(&self.entries)
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %err,
                    "Gallery refresh failed"
                );
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Open the lightbox on the named entry.
    ///
    /// Returns `false` (and leaves the lightbox alone) when the entry is
    /// missing or is a video — videos render inline and are not eligible.
    pub fn open_preview(&mut self, name: &str) -> bool {
        let Some(entry) = self.entries.iter().find(|e| e.name == name) else {
            return false;
        };
        if entry.kind != MediaKind::Image {
            return false;
        }
        self.lightbox = Lightbox::Showing(entry.url.clone());
        true
    }

    /// Close the lightbox.
    pub fn close_preview(&mut self) {
        self.lightbox = Lightbox::Closed;
    }

    /// Delete the object stored under `key`.
    ///
    /// Success re-runs the listing — the UI trusts a fresh fetch, never an
    /// optimistic local removal. Failure leaves the listing unchanged.
    pub async fn delete(&mut self, key: &str) -> DeleteOutcome {
        match self.store.delete(key).await {
            Ok(()) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    key = %key,
                    "Deleted blob"
                );
                // A failed refresh here leaves the error banner set; the
                // delete itself still succeeded.
                let _ = self.refresh().await;
                DeleteOutcome::Deleted {
                    key: key.to_string(),
                }
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    key = %key,
                    error = %err,
                    "Delete failed"
                );
                DeleteOutcome::Failed {
                    error: err.to_string(),
                }
            }
        }
    }
}
