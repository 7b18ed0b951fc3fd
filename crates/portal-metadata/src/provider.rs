//! Provider trait for metadata registration backends.

use crate::error::Result;
use crate::record::MediaRecord;
use crate::response::RegisterResponse;

/// A backend able to register [`MediaRecord`]s.
///
/// Implementations must treat delivery as best-effort: transport failures
/// and rejections are reported through a failed [`RegisterResponse`], and
/// `Err` is reserved for local faults (e.g. a record that cannot be
/// serialized).
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Register one record with the metadata endpoint.
    async fn register(&self, record: &MediaRecord) -> Result<RegisterResponse>;
}
