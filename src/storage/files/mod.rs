//! Certificate artifact storage
//!
//! Rendered certificates are persisted through an [`ArtifactStore`] that hands
//! back a stable URL for each stored file.

mod dispatch;
mod error;
mod local;
#[cfg(feature = "s3")]
mod s3;
mod types;

pub use error::StoreError;
pub use local::LocalArtifactStore;
#[cfg(feature = "s3")]
pub use s3::S3ArtifactStore;
pub use types::{ArtifactMetadata, FileStorage};

use async_trait::async_trait;
use bytes::Bytes;

/// Persists rendered artifacts and returns their public URL
#[async_trait]
pub trait ArtifactStore: Send + Sync {
    /// Store `content` under a name derived from `suggested_name`.
    ///
    /// The returned URL stays valid and fetchable after the batch ends.
    async fn store(&self, content: Bytes, suggested_name: &str) -> Result<String, StoreError>;
}

/// Detect content type from a file name
pub(crate) fn detect_content_type(filename: &str) -> &'static str {
    match std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("pdf") => "application/pdf",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("json") => "application/json",
        _ => "application/octet-stream",
    }
}

/// Reduce a suggested name to a single safe path segment
pub(crate) fn sanitize_name(suggested_name: &str) -> String {
    let base = suggested_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(suggested_name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        "artifact".to_string()
    } else {
        cleaned.to_string()
    }
}
