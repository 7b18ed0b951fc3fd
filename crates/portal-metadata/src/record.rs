//! The metadata record posted for every uploaded blob.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Externally persisted description of an uploaded blob.
///
/// The wire format is owned by the metadata endpoint; field names here
/// (including the `userID` spelling) must match it exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    /// Record id: the object key's stem, i.e. the text before the first `.`.
    pub id: String,
    /// Sanitized object key the blob was stored under.
    pub file_name: String,
    /// Display/download URL of the blob, token included.
    pub file_path: String,
    /// Identity of the uploader.
    #[serde(rename = "userID")]
    pub user_id: String,
    /// MIME type reported by the file picker, e.g. `image/png`.
    pub mime_type: String,
    /// Size of the blob in bytes.
    pub file_size: u64,
    /// When the upload completed.
    pub upload_time: Timestamp,
}
