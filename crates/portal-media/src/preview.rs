//! Preview handles with deterministic release.
//!
//! While a selection is displayed, each file owns one preview resource
//! (the browser original used object URLs). These are the only locally
//! owned resources in the portal and must be released when a new
//! selection supersedes them or the view goes away. [`PreviewUrl`] is an
//! RAII guard: dropping it deregisters the handle.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use uuid::Uuid;

/// Issues preview handles and tracks which are still live.
#[derive(Clone, Debug, Default)]
pub struct PreviewRegistry {
    live: Arc<Mutex<HashSet<Uuid>>>,
}

impl PreviewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a preview for one selected file.
    pub fn create(&self, name: &str, content_type: &str) -> Preview {
        let id = Uuid::new_v4();
        self.live
            .lock()
            .expect("preview registry lock poisoned")
            .insert(id);
        Preview {
            name: name.to_string(),
            content_type: content_type.to_string(),
            url: PreviewUrl {
                id,
                url: format!("preview://{id}/{name}"),
                registry: self.live.clone(),
            },
        }
    }

    /// Number of handles not yet released.
    pub fn live_count(&self) -> usize {
        self.live
            .lock()
            .expect("preview registry lock poisoned")
            .len()
    }
}

/// One file's preview as shown next to the picker.
#[derive(Debug)]
pub struct Preview {
    /// Original (unsanitized) file name.
    pub name: String,
    /// MIME type, used to pick an image or video thumbnail.
    pub content_type: String,
    /// The preview resource handle.
    pub url: PreviewUrl,
}

/// RAII handle for a preview resource; released on drop.
#[derive(Debug)]
pub struct PreviewUrl {
    id: Uuid,
    url: String,
    registry: Arc<Mutex<HashSet<Uuid>>>,
}

impl PreviewUrl {
    /// The displayable URL for this preview.
    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl Drop for PreviewUrl {
    fn drop(&mut self) {
        if let Ok(mut live) = self.registry.lock() {
            live.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_released_on_drop() {
        let registry = PreviewRegistry::new();
        let preview = registry.create("a b.png", "image/png");
        assert_eq!(registry.live_count(), 1);
        assert!(preview.url.as_str().starts_with("preview://"));

        drop(preview);
        assert_eq!(registry.live_count(), 0);
    }

    #[test]
    fn a_new_batch_releases_the_old_one() {
        let registry = PreviewRegistry::new();
        let first: Vec<_> = ["a.png", "b.png"]
            .iter()
            .map(|name| registry.create(name, "image/png"))
            .collect();
        assert_eq!(registry.live_count(), 2);

        // Replacing the displayed batch drops the previous handles.
        let _second: Vec<_> = ["c.mp4"]
            .iter()
            .map(|name| registry.create(name, "video/mp4"))
            .collect();
        drop(first);
        assert_eq!(registry.live_count(), 1);
    }
}
