//! The portal facade tying upload completion to a gallery refresh.

use portal_metadata::{MetadataClient, MetadataService};
use portal_object::client::ContainerClient;
use portal_object::container::{AzureContainer, ContainerAddress};

use crate::config::PortalConfig;
use crate::error::Result;
use crate::gallery::Gallery;
use crate::uploader::{UploadOutcome, Uploader};

/// The two halves of the portal over one shared container.
///
/// The uploader and gallery are otherwise independent; their only link is
/// that a completed upload re-runs the gallery listing. The original tool
/// forced this with a full page reload — here it is a targeted refresh.
#[derive(Debug)]
pub struct Portal {
    uploader: Uploader,
    gallery: Gallery,
}

impl Portal {
    /// Connect both halves from the session configuration.
    pub fn connect(config: &PortalConfig) -> Result<Self> {
        let container = AzureContainer::connect(&config.container)?;
        let metadata = MetadataClient::with_defaults(config.post_api.clone())?;
        Ok(Self::assemble(
            container.client().clone(),
            config.container.clone(),
            MetadataService::new(metadata),
            &config.user_id,
        ))
    }

    /// Assemble a portal from already-built parts.
    pub fn assemble(
        store: ContainerClient,
        address: ContainerAddress,
        metadata: MetadataService,
        user_id: &str,
    ) -> Self {
        Self {
            uploader: Uploader::new(store.clone(), address.clone(), metadata, user_id),
            gallery: Gallery::new(store, address),
        }
    }

    /// The upload half.
    pub fn uploader(&self) -> &Uploader {
        &self.uploader
    }

    /// Mutable access to the upload half.
    pub fn uploader_mut(&mut self) -> &mut Uploader {
        &mut self.uploader
    }

    /// The gallery half.
    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Mutable access to the gallery half.
    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    /// Upload the current selection, then refresh the gallery if the batch
    /// completed.
    ///
    /// A refresh failure after a completed upload shows up in the
    /// gallery's error state, not in the upload outcome.
    pub async fn upload_selected(&mut self) -> UploadOutcome {
        let outcome = self.uploader.upload().await;
        if matches!(outcome, UploadOutcome::Completed(_)) {
            let _ = self.gallery.refresh().await;
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use url::Url;

    use super::*;
    use crate::config::{ENV_BLOB_URL, ENV_POST_API, ENV_SAS_TOKEN};
    use crate::media::{MediaFile, MediaKind};
    use crate::testing::{FlakyStore, RecordingProvider};

    fn address() -> ContainerAddress {
        ContainerAddress::new(
            Url::parse("https://account.blob.core.windows.net/media").unwrap(),
            "sig=abc",
        )
    }

    fn portal(store: &FlakyStore, provider: &RecordingProvider) -> Portal {
        Portal::assemble(
            ContainerClient::new(store.clone()),
            address(),
            MetadataService::new(provider.clone()),
            "user123",
        )
    }

    #[test]
    fn connect_builds_from_configuration() {
        let config = PortalConfig::from_lookup(|name| match name {
            ENV_BLOB_URL => Some("https://account.blob.core.windows.net/media".into()),
            ENV_SAS_TOKEN => Some("sv=2024-01-01&sig=abc".into()),
            ENV_POST_API => Some("https://example.com/api/media".into()),
            _ => None,
        })
        .unwrap();

        let portal = Portal::connect(&config).unwrap();
        assert!(portal.gallery().entries().is_empty());
    }

    #[tokio::test]
    async fn upload_then_register_then_refresh() {
        // "a b.png" and "c.mp4" end to end, with one registration
        // silently failing along the way.
        let store = FlakyStore::new();
        let provider = RecordingProvider::new().fail_id("c");
        let mut portal = portal(&store, &provider);

        portal.uploader_mut().select_files(vec![
            MediaFile::new("a b.png", "image/png", Bytes::from("png-bytes")),
            MediaFile::new("c.mp4", "video/mp4", Bytes::from("mp4")),
        ]);

        let outcome = portal.upload_selected().await;
        assert_eq!(outcome.status_line(), "Uploaded 2 file(s)");
        assert_eq!(store.put_attempts(), ["a_b.png", "c.mp4"]);

        let ids: Vec<_> = provider.records().iter().map(|r| r.id.clone()).collect();
        assert_eq!(ids, ["a_b", "c"]);

        // The completed upload refreshed the gallery in place.
        let entries = portal.gallery().entries();
        assert_eq!(entries.len(), 2);
        let clip = entries.iter().find(|e| e.name == "c.mp4").unwrap();
        assert_eq!(clip.kind, MediaKind::Video);
    }

    #[tokio::test]
    async fn an_empty_selection_does_not_touch_the_gallery() {
        let store = FlakyStore::new();
        let provider = RecordingProvider::new();
        let mut portal = portal(&store, &provider);

        let outcome = portal.upload_selected().await;
        assert_eq!(outcome.status_line(), "Please select at least one file.");
        assert!(store.put_attempts().is_empty());
        assert!(provider.records().is_empty());
        assert!(portal.gallery().entries().is_empty());
    }

    #[tokio::test]
    async fn a_failed_batch_does_not_refresh_the_gallery() {
        let store = FlakyStore::new().fail_put("bad.png");
        let provider = RecordingProvider::new();
        let mut portal = portal(&store, &provider);

        portal.uploader_mut().select_files(vec![
            MediaFile::new("ok.png", "image/png", Bytes::from("ok")),
            MediaFile::new("bad.png", "image/png", Bytes::from("bad")),
        ]);

        let outcome = portal.upload_selected().await;
        assert!(outcome.status_line().starts_with("Upload failed:"));
        // The gallery was not refreshed; the partial write only shows up
        // on the next explicit refresh.
        assert!(portal.gallery().entries().is_empty());
        portal.gallery_mut().refresh().await.unwrap();
        assert_eq!(portal.gallery().entries().len(), 1);
    }

    #[tokio::test]
    async fn delete_after_upload_round_trip() {
        let store = FlakyStore::new();
        let provider = RecordingProvider::new();
        let mut portal = portal(&store, &provider);

        portal.uploader_mut().select_files(vec![MediaFile::new(
            "photo.png",
            "image/png",
            Bytes::from("x"),
        )]);
        portal.upload_selected().await;
        assert_eq!(portal.gallery().entries().len(), 1);

        let outcome = portal.gallery_mut().delete("photo.png").await;
        assert_eq!(outcome.status_line(), "Deleted: photo.png");
        assert!(portal.gallery().entries().is_empty());
    }
}
