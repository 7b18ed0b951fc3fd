//! Container client backed by [`object_store::ObjectStore`].
//!
//! [`ContainerClient`] is a thin, cloneable wrapper around
//! `Arc<dyn ObjectStore>` exposing the operations the portal performs
//! against its container: probe, enumerate, put, and delete. Every
//! public method is instrumented with [`tracing`] for observability.

use std::sync::Arc;

use bytes::Bytes;
use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore, PutMode, PutOptions, PutPayload, PutResult};

use crate::error::{Error, Result};

/// Cloneable handle to the portal's blob container.
///
/// All methods accept human-readable string keys and convert them to
/// [`object_store::path::Path`] internally. Puts always overwrite: the
/// portal performs no existence check and keeps no versions.
#[derive(Clone, Debug)]
pub struct ContainerClient(pub Arc<dyn ObjectStore>);

/// Result of a completed put.
#[derive(Clone, Debug)]
pub struct PutOutput {
    /// Entity tag reported by the store, if any.
    pub e_tag: Option<String>,
    /// Version identifier reported by the store, if any.
    pub version: Option<String>,
}

impl From<PutResult> for PutOutput {
    fn from(result: PutResult) -> Self {
        Self {
            e_tag: result.e_tag,
            version: result.version,
        }
    }
}

impl ContainerClient {
    /// Wrap a concrete [`ObjectStore`] implementation.
    pub fn new(store: impl ObjectStore) -> Self {
        Self(Arc::new(store))
    }

    /// Verify that the backing container is reachable.
    ///
    /// Issues a HEAD for a probe key; a not-found response means the
    /// container itself answered and counts as success. Any other error
    /// is propagated.
    #[tracing::instrument(name = "container.verify", skip(self))]
    pub async fn verify_reachable(&self) -> Result<()> {
        let path = Path::from("_portal_verify_probe");
        match self.0.head(&path).await {
            Ok(_) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(Error::Store(e)),
        }
    }

    /// Enumerate every object in the container.
    ///
    /// Entries are returned in whatever order the store yields them; the
    /// client imposes no sort of its own.
    #[tracing::instrument(name = "container.list", skip(self))]
    pub async fn list(&self) -> Result<Vec<ObjectMeta>> {
        self.0.list(None).try_collect().await.map_err(Error::Store)
    }

    /// Upload `data` under `key`, overwriting any existing object.
    #[tracing::instrument(name = "container.put", skip(self, data), fields(key, size = data.len()))]
    pub async fn put(
        &self,
        key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> Result<PutOutput> {
        let path = Path::from(key);
        let payload = PutPayload::from(data);
        let mut opts = PutOptions {
            mode: PutMode::Overwrite,
            ..Default::default()
        };
        if let Some(ct) = content_type {
            opts.attributes
                .insert(object_store::Attribute::ContentType, ct.to_string().into());
        }
        let result = self
            .0
            .put_opts(&path, payload, opts)
            .await
            .map_err(|e| Error::from_store(e, key))?;
        Ok(result.into())
    }

    /// Delete the object at `key`.
    #[tracing::instrument(name = "container.delete", skip(self), fields(key))]
    pub async fn delete(&self, key: &str) -> Result<()> {
        let path = Path::from(key);
        self.0
            .delete(&path)
            .await
            .map_err(|e| Error::from_store(e, key))
    }
}

#[cfg(test)]
mod tests {
    use object_store::memory::InMemory;

    use super::*;

    fn test_client() -> ContainerClient {
        ContainerClient::new(InMemory::new())
    }

    #[tokio::test]
    async fn put_returns_output() {
        let client = test_client();
        let output = client
            .put("photo.png", Bytes::from("x"), Some("image/png"))
            .await
            .unwrap();
        assert!(output.e_tag.is_some());
    }

    #[tokio::test]
    async fn list_sees_every_put() {
        let client = test_client();
        for name in ["a.png", "b.jpg", "c.mp4"] {
            client.put(name, Bytes::from("data"), None).await.unwrap();
        }

        let entries = client.list().await.unwrap();
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn put_overwrites_silently() {
        let client = test_client();
        client
            .put("photo.png", Bytes::from("first"), None)
            .await
            .unwrap();
        client
            .put("photo.png", Bytes::from("second, longer"), None)
            .await
            .unwrap();

        let entries = client.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].size, "second, longer".len() as u64);
    }

    #[tokio::test]
    async fn delete_removes_the_object() {
        let client = test_client();
        client
            .put("gone.png", Bytes::from("x"), None)
            .await
            .unwrap();
        client.delete("gone.png").await.unwrap();

        assert!(client.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_is_accepted_by_the_memory_store() {
        // The memory backend treats a missing key as already deleted.
        // Backends that report it surface `Error::NotFound` through the
        // mapping covered in `error::tests`.
        let client = test_client();
        client.delete("missing.png").await.unwrap();
    }

    #[tokio::test]
    async fn verify_reachable_tolerates_an_empty_container() {
        let client = test_client();
        client.verify_reachable().await.unwrap();
    }

    #[tokio::test]
    async fn verify_reachable_succeeds_with_objects_present() {
        let client = test_client();
        client
            .put("photo.png", Bytes::from("x"), None)
            .await
            .unwrap();
        client.verify_reachable().await.unwrap();
    }
}
