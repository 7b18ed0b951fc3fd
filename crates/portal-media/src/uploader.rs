//! Sequential upload-then-register workflow.

use jiff::Timestamp;
use portal_metadata::{MediaRecord, MetadataService, RegisterResponse};
use portal_object::client::ContainerClient;
use portal_object::container::ContainerAddress;

use crate::media::{self, MediaFile};
use crate::preview::{Preview, PreviewRegistry};

/// Tracing target for uploader operations.
pub const TRACING_TARGET: &str = "portal_media::uploader";

/// Aggregate result of one completed upload invocation.
#[derive(Debug)]
pub struct UploadReport {
    /// Number of files written to the container.
    pub uploaded: usize,
    /// One registration response per uploaded file, in upload order.
    ///
    /// Failed registrations are recorded here and in the log, and nowhere
    /// else: they never change the upload's reported status.
    pub registrations: Vec<RegisterResponse>,
}

impl UploadReport {
    /// How many registrations the endpoint did not acknowledge.
    pub fn failed_registrations(&self) -> usize {
        self.registrations.iter().filter(|r| !r.success).count()
    }
}

/// Result of one upload invocation.
#[derive(Debug)]
pub enum UploadOutcome {
    /// Nothing was selected; no network call was made.
    NothingSelected,
    /// Every file in the batch was written to the container.
    Completed(UploadReport),
    /// A container write failed and aborted the rest of the batch.
    ///
    /// Files written before the failing one remain in storage; files after
    /// it were never attempted.
    Failed {
        /// Files written before the failure.
        uploaded: usize,
        /// The underlying store error, verbatim.
        error: String,
    },
}

impl UploadOutcome {
    /// The user-facing status line for this outcome.
    pub fn status_line(&self) -> String {
        match self {
            Self::NothingSelected => "Please select at least one file.".to_string(),
            Self::Completed(report) => format!("Uploaded {} file(s)", report.uploaded),
            Self::Failed { error, .. } => format!("Upload failed: {error}"),
        }
    }
}

/// Writes selected files to the container and registers their metadata.
///
/// Uploads are strictly sequential: file `i + 1`'s write does not begin
/// until file `i`'s write and its best-effort registration have settled.
/// There is exactly one failure that aborts a batch — a container write
/// error. Registration failures are logged and reported in the
/// [`UploadReport`] but never interrupt anything.
#[derive(Debug)]
pub struct Uploader {
    store: ContainerClient,
    address: ContainerAddress,
    metadata: MetadataService,
    user_id: String,
    registry: PreviewRegistry,
    selection: Vec<MediaFile>,
    previews: Vec<Preview>,
}

impl Uploader {
    /// Create an uploader over the given container and metadata service.
    pub fn new(
        store: ContainerClient,
        address: ContainerAddress,
        metadata: MetadataService,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            store,
            address,
            metadata,
            user_id: user_id.into(),
            registry: PreviewRegistry::new(),
            selection: Vec::new(),
            previews: Vec::new(),
        }
    }

    /// Replace the current selection with `files`.
    ///
    /// Preview handles for the previous selection are released before the
    /// new ones are issued.
    pub fn select_files(&mut self, files: Vec<MediaFile>) {
        self.previews = files
            .iter()
            .map(|file| self.registry.create(&file.name, &file.content_type))
            .collect();
        self.selection = files;
    }

    /// The currently selected files.
    pub fn selection(&self) -> &[MediaFile] {
        &self.selection
    }

    /// Previews for the current selection.
    pub fn previews(&self) -> &[Preview] {
        &self.previews
    }

    /// The preview registry backing this uploader's selection.
    pub fn preview_registry(&self) -> &PreviewRegistry {
        &self.registry
    }

    /// Upload the current selection, one file at a time.
    ///
    /// On full success the selection and its previews are cleared. On a
    /// store failure they are kept, matching the original tool, where a
    /// failed batch left the picker untouched.
    pub async fn upload(&mut self) -> UploadOutcome {
        if self.selection.is_empty() {
            return UploadOutcome::NothingSelected;
        }

        let total = self.selection.len();
        let mut registrations = Vec::with_capacity(total);

        for (index, file) in self.selection.iter().enumerate() {
            let key = file.key();

            tracing::debug!(
                target: TRACING_TARGET,
                key = %key,
                index,
                total,
                size = file.size(),
                "Uploading file"
            );

            if let Err(err) = self
                .store
                .put(&key, file.bytes.clone(), Some(&file.content_type))
                .await
            {
                tracing::error!(
                    target: TRACING_TARGET,
                    key = %key,
                    uploaded = index,
                    error = %err,
                    "Upload aborted"
                );
                return UploadOutcome::Failed {
                    uploaded: index,
                    error: err.to_string(),
                };
            }

            let record = MediaRecord {
                id: media::key_stem(&key).to_string(),
                file_name: key.clone(),
                file_path: self.address.content_url(&key),
                user_id: self.user_id.clone(),
                mime_type: file.content_type.clone(),
                file_size: file.size(),
                upload_time: Timestamp::now(),
            };

            // Best-effort side channel: a local registration error is
            // downgraded to a failed response so the batch keeps going.
            match self.metadata.register(&record).await {
                Ok(response) => registrations.push(response),
                Err(err) => registrations.push(RegisterResponse::failure(err.to_string())),
            }
        }

        tracing::info!(
            target: TRACING_TARGET,
            uploaded = total,
            "Upload complete"
        );

        self.selection.clear();
        self.previews.clear();

        UploadOutcome::Completed(UploadReport {
            uploaded: total,
            registrations,
        })
    }
}
