//! Artifact storage types and enums

use super::LocalArtifactStore;
#[cfg(feature = "s3")]
use super::S3ArtifactStore;

/// Artifact storage backend selected by configuration
#[derive(Debug, Clone)]
pub enum FileStorage {
    /// Local file system storage
    Local(LocalArtifactStore),
    /// Amazon S3 storage
    #[cfg(feature = "s3")]
    S3(S3ArtifactStore),
}

/// Sidecar metadata written next to every stored artifact
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ArtifactMetadata {
    /// Artifact ID
    pub id: String,
    /// Stored filename
    pub filename: String,
    /// MIME content type
    pub content_type: String,
    /// File size in bytes
    pub size: u64,
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// SHA-256 checksum, hex encoded
    pub checksum: String,
}
