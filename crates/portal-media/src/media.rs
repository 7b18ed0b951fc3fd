//! Local media files, key sanitization, and kind classification.

use bytes::Bytes;

/// Filename suffixes rendered as inline video rather than images.
const VIDEO_SUFFIXES: [&str; 3] = [".mp4", ".webm", ".mov"];

/// What a gallery entry renders as, inferred purely from the filename
/// suffix — never from the actual bytes or stored content type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// Rendered as an image; eligible for the lightbox.
    Image,
    /// Rendered inline with native playback controls.
    Video,
}

impl MediaKind {
    /// Classify a filename. Anything that is not a known video suffix is
    /// an image.
    pub fn from_name(name: &str) -> Self {
        if VIDEO_SUFFIXES.iter().any(|suffix| name.ends_with(suffix)) {
            Self::Video
        } else {
            Self::Image
        }
    }
}

/// Derive the storage key for an original file name: every character
/// outside `[A-Za-z0-9.\-_]` becomes `_`.
///
/// Total and idempotent. Distinct original names may collide on the same
/// key; that is not detected or prevented.
pub fn sanitize_key(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// The record id for a key: everything before the first `.`, or the whole
/// key when it has no dot.
pub fn key_stem(key: &str) -> &str {
    key.split('.').next().unwrap_or(key)
}

/// A user-selected local file, held only until its upload attempt settles.
#[derive(Clone, Debug)]
pub struct MediaFile {
    /// Original file name as picked, before sanitization.
    pub name: String,
    /// MIME type reported by the picker, e.g. `video/mp4`.
    pub content_type: String,
    /// The file's bytes.
    pub bytes: Bytes,
}

impl MediaFile {
    /// Create a file handle from its parts.
    pub fn new(
        name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// The storage key this file uploads under.
    pub fn key(&self) -> String {
        sanitize_key(&self.name)
    }

    /// Byte size of the file.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}
