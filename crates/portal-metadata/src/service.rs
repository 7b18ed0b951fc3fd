//! Metadata service wrapper with observability.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use crate::error::Result;
use crate::provider::MetadataProvider;
use crate::record::MediaRecord;
use crate::response::RegisterResponse;

/// Tracing target for metadata service operations.
pub const TRACING_TARGET: &str = "portal_metadata::service";

/// Registration service wrapper with observability.
///
/// Adds structured logging to any [`MetadataProvider`]. The inner provider
/// is wrapped in `Arc` for cheap cloning. A failed registration is logged
/// at `warn` and then handed back to the caller unchanged; nothing here
/// retries or escalates.
#[derive(Clone)]
pub struct MetadataService {
    inner: Arc<dyn MetadataProvider>,
}

impl fmt::Debug for MetadataService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataService").finish_non_exhaustive()
    }
}

impl MetadataService {
    /// Create a new service wrapper.
    pub fn new<P>(provider: P) -> Self
    where
        P: MetadataProvider + 'static,
    {
        Self {
            inner: Arc::new(provider),
        }
    }

    /// Register one record, logging the outcome.
    pub async fn register(&self, record: &MediaRecord) -> Result<RegisterResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            record_id = %record.id,
            file_name = %record.file_name,
            file_size = record.file_size,
            "Registering metadata record"
        );

        let result = self.inner.register(record).await;
        let elapsed = started_at.elapsed();

        match &result {
            Ok(response) => {
                if response.success {
                    tracing::debug!(
                        target: TRACING_TARGET,
                        record_id = %record.id,
                        response_id = %response.response_id,
                        status_code = ?response.status_code,
                        elapsed_ms = elapsed.as_millis(),
                        "Metadata record stored"
                    );
                } else {
                    tracing::warn!(
                        target: TRACING_TARGET,
                        record_id = %record.id,
                        response_id = %response.response_id,
                        status_code = ?response.status_code,
                        error = ?response.error,
                        elapsed_ms = elapsed.as_millis(),
                        "Metadata registration failed"
                    );
                }
            }
            Err(error) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    record_id = %record.id,
                    error = %error,
                    elapsed_ms = elapsed.as_millis(),
                    "Metadata registration error"
                );
            }
        }

        result
    }
}
