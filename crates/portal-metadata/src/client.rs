//! Metadata registration client using reqwest.

use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use url::Url;

use crate::config::MetadataClientConfig;
use crate::error::{Error, Result};
use crate::provider::MetadataProvider;
use crate::record::MediaRecord;
use crate::response::RegisterResponse;

/// Tracing target for metadata client operations.
const TRACING_TARGET: &str = "portal_metadata::client";

/// Inner client that holds the HTTP client, endpoint, and configuration.
struct MetadataClientInner {
    http: Client,
    endpoint: Url,
    config: MetadataClientConfig,
}

impl std::fmt::Debug for MetadataClientInner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataClientInner")
            .field("endpoint", &self.endpoint.as_str())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// HTTP client that POSTs [`MediaRecord`]s to the metadata endpoint.
///
/// Any 2xx status is treated as success. Non-2xx statuses and transport
/// failures come back as failed [`RegisterResponse`]s; they are never
/// escalated to `Err`, matching the portal's fire-and-forget contract.
#[derive(Clone, Debug)]
pub struct MetadataClient {
    inner: Arc<MetadataClientInner>,
}

impl MetadataClient {
    /// Creates a new client posting to `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn new(endpoint: Url, config: MetadataClientConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET,
            endpoint = %endpoint,
            timeout_ms = config.timeout.as_millis(),
            "Creating metadata client"
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let inner = MetadataClientInner {
            http,
            endpoint,
            config,
        };
        Ok(Self {
            inner: Arc::new(inner),
        })
    }

    /// Creates a new client with default configuration.
    pub fn with_defaults(endpoint: Url) -> Result<Self> {
        Self::new(endpoint, MetadataClientConfig::default())
    }

    /// Gets the client configuration.
    pub fn config(&self) -> &MetadataClientConfig {
        &self.inner.config
    }

    /// The endpoint records are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }
}

#[async_trait::async_trait]
impl MetadataProvider for MetadataClient {
    async fn register(&self, record: &MediaRecord) -> Result<RegisterResponse> {
        let started_at = Instant::now();

        tracing::debug!(
            target: TRACING_TARGET,
            record_id = %record.id,
            file_name = %record.file_name,
            "Registering metadata record"
        );

        // Serialize up front: a record that cannot be serialized is a local
        // fault, not a delivery failure.
        let payload = serde_json::to_vec(record).map_err(Error::Serde)?;

        let result = self
            .inner
            .http
            .post(self.inner.endpoint.clone())
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await;
        let elapsed = started_at.elapsed();

        match result {
            Ok(http_response) => {
                let status_code = http_response.status().as_u16();
                let response = if http_response.status().is_success() {
                    RegisterResponse::success(status_code)
                } else {
                    RegisterResponse::failure(format!("HTTP {status_code}"))
                        .with_status_code(status_code)
                };
                Ok(response.with_duration(elapsed))
            }
            Err(err) => {
                let error_message = if err.is_timeout() {
                    "Request timed out".to_string()
                } else if err.is_connect() {
                    "Connection failed".to_string()
                } else {
                    err.to_string()
                };
                Ok(RegisterResponse::failure(error_message).with_duration(elapsed))
            }
        }
    }
}
