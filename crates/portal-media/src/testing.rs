//! Test doubles for the portal workflows.
//!
//! [`FlakyStore`] wraps [`InMemory`] with per-key fault injection and an
//! attempt log, so tests can prove the uploader's sequential, abort-on-
//! failure behavior. [`RecordingProvider`] captures every metadata record
//! and can be told to reject them, so tests can prove registration
//! failures never change an upload's reported status.
//!
//! Both doubles are cloneable views over shared state: keep a clone to
//! inspect attempts after handing the original to a client.

use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use futures::stream::BoxStream;
use object_store::memory::InMemory;
use object_store::path::Path;
use object_store::{
    GetOptions, GetResult, ListResult, MultipartUpload, ObjectMeta, ObjectStore, PutMultipartOpts,
    PutOptions, PutPayload, PutResult,
};
use portal_metadata::{MediaRecord, MetadataProvider, RegisterResponse};

/// An in-memory store that can be told to fail specific operations.
#[derive(Clone, Debug)]
pub struct FlakyStore {
    inner: Arc<InMemory>,
    fail_puts: Arc<Mutex<HashSet<String>>>,
    fail_deletes: Arc<Mutex<HashSet<String>>>,
    put_attempts: Arc<Mutex<Vec<String>>>,
}

impl Default for FlakyStore {
    fn default() -> Self {
        Self {
            inner: Arc::new(InMemory::new()),
            fail_puts: Arc::default(),
            fail_deletes: Arc::default(),
            put_attempts: Arc::default(),
        }
    }
}

impl FlakyStore {
    /// Create a store with no injected faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every put targeting `key`.
    pub fn fail_put(self, key: &str) -> Self {
        self.fail_puts
            .lock()
            .expect("fault set lock poisoned")
            .insert(key.to_string());
        self
    }

    /// Fail every delete targeting `key`.
    pub fn fail_delete(self, key: &str) -> Self {
        self.fail_deletes
            .lock()
            .expect("fault set lock poisoned")
            .insert(key.to_string());
        self
    }

    /// Keys of every put attempted so far, in order, including failed ones.
    pub fn put_attempts(&self) -> Vec<String> {
        self.put_attempts
            .lock()
            .expect("attempt log lock poisoned")
            .clone()
    }

    fn injected(&self, what: &str) -> object_store::Error {
        object_store::Error::Generic {
            store: "flaky",
            source: format!("injected {what} failure").into(),
        }
    }
}

impl fmt::Display for FlakyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlakyStore(InMemory)")
    }
}

#[async_trait::async_trait]
impl ObjectStore for FlakyStore {
    async fn put_opts(
        &self,
        location: &Path,
        payload: PutPayload,
        opts: PutOptions,
    ) -> object_store::Result<PutResult> {
        let key = location.to_string();
        self.put_attempts
            .lock()
            .expect("attempt log lock poisoned")
            .push(key.clone());
        if self
            .fail_puts
            .lock()
            .expect("fault set lock poisoned")
            .contains(&key)
        {
            return Err(self.injected("put"));
        }
        self.inner.put_opts(location, payload, opts).await
    }

    async fn put_multipart_opts(
        &self,
        location: &Path,
        opts: PutMultipartOpts,
    ) -> object_store::Result<Box<dyn MultipartUpload>> {
        self.inner.put_multipart_opts(location, opts).await
    }

    async fn get_opts(
        &self,
        location: &Path,
        options: GetOptions,
    ) -> object_store::Result<GetResult> {
        self.inner.get_opts(location, options).await
    }

    async fn delete(&self, location: &Path) -> object_store::Result<()> {
        if self
            .fail_deletes
            .lock()
            .expect("fault set lock poisoned")
            .contains(&location.to_string())
        {
            return Err(self.injected("delete"));
        }
        self.inner.delete(location).await
    }

    fn list(&self, prefix: Option<&Path>) -> BoxStream<'static, object_store::Result<ObjectMeta>> {
        self.inner.list(prefix)
    }

    async fn list_with_delimiter(
        &self,
        prefix: Option<&Path>,
    ) -> object_store::Result<ListResult> {
        self.inner.list_with_delimiter(prefix).await
    }

    async fn copy(&self, from: &Path, to: &Path) -> object_store::Result<()> {
        self.inner.copy(from, to).await
    }

    async fn copy_if_not_exists(&self, from: &Path, to: &Path) -> object_store::Result<()> {
        self.inner.copy_if_not_exists(from, to).await
    }
}

/// A store whose every operation fails, for exercising listing failures.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrokenListing;

impl BrokenListing {
    fn unavailable(&self) -> object_store::Error {
        object_store::Error::Generic {
            store: "broken",
            source: "listing unavailable".into(),
        }
    }
}

impl fmt::Display for BrokenListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BrokenListing")
    }
}

#[async_trait::async_trait]
impl ObjectStore for BrokenListing {
    async fn put_opts(
        &self,
        _location: &Path,
        _payload: PutPayload,
        _opts: PutOptions,
    ) -> object_store::Result<PutResult> {
        Err(self.unavailable())
    }

    async fn put_multipart_opts(
        &self,
        _location: &Path,
        _opts: PutMultipartOpts,
    ) -> object_store::Result<Box<dyn MultipartUpload>> {
        Err(self.unavailable())
    }

    async fn get_opts(
        &self,
        _location: &Path,
        _options: GetOptions,
    ) -> object_store::Result<GetResult> {
        Err(self.unavailable())
    }

    async fn delete(&self, _location: &Path) -> object_store::Result<()> {
        Err(self.unavailable())
    }

    fn list(&self, _prefix: Option<&Path>) -> BoxStream<'static, object_store::Result<ObjectMeta>> {
        let err = self.unavailable();
        Box::pin(futures::stream::once(async move { Err(err) }))
    }

    async fn list_with_delimiter(
        &self,
        _prefix: Option<&Path>,
    ) -> object_store::Result<ListResult> {
        Err(self.unavailable())
    }

    async fn copy(&self, _from: &Path, _to: &Path) -> object_store::Result<()> {
        Err(self.unavailable())
    }

    async fn copy_if_not_exists(&self, _from: &Path, _to: &Path) -> object_store::Result<()> {
        Err(self.unavailable())
    }
}

/// A metadata provider that records every registration attempt.
#[derive(Clone, Debug, Default)]
pub struct RecordingProvider {
    records: Arc<Mutex<Vec<MediaRecord>>>,
    fail_all: Arc<AtomicBool>,
    fail_ids: Arc<Mutex<HashSet<String>>>,
}

impl RecordingProvider {
    /// Create a provider that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every record with an `HTTP 500` failure response.
    pub fn fail_everything(self) -> Self {
        self.fail_all.store(true, Ordering::SeqCst);
        self
    }

    /// Reject records whose `id` equals `id`.
    pub fn fail_id(self, id: &str) -> Self {
        self.fail_ids
            .lock()
            .expect("fault set lock poisoned")
            .insert(id.to_string());
        self
    }

    /// Every record seen so far, in order, including rejected ones.
    pub fn records(&self) -> Vec<MediaRecord> {
        self.records
            .lock()
            .expect("record log lock poisoned")
            .clone()
    }
}

#[async_trait::async_trait]
impl MetadataProvider for RecordingProvider {
    async fn register(
        &self,
        record: &MediaRecord,
    ) -> portal_metadata::Result<RegisterResponse> {
        self.records
            .lock()
            .expect("record log lock poisoned")
            .push(record.clone());

        let rejected = self.fail_all.load(Ordering::SeqCst)
            || self
                .fail_ids
                .lock()
                .expect("fault set lock poisoned")
                .contains(&record.id);

        Ok(if rejected {
            RegisterResponse::failure("HTTP 500").with_status_code(500)
        } else {
            RegisterResponse::success(200)
        })
    }
}
