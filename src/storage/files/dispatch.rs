//! FileStorage enum implementation with dispatch methods

use crate::config::{StorageBackend, StorageConfig};
#[cfg(not(feature = "s3"))]
use crate::utils::error::CertforgeError;
use crate::utils::error::Result;
use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use super::error::StoreError;
use super::local::LocalArtifactStore;
#[cfg(feature = "s3")]
use super::s3::S3ArtifactStore;
use super::types::FileStorage;
use super::ArtifactStore;

impl FileStorage {
    /// Create the configured storage backend
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        info!("Initializing artifact storage: {}", config.backend);

        match config.backend {
            StorageBackend::Local => Ok(FileStorage::Local(
                LocalArtifactStore::new(&config.local).await?,
            )),
            #[cfg(feature = "s3")]
            StorageBackend::S3 => Ok(FileStorage::S3(S3ArtifactStore::new(&config.s3).await?)),
            #[cfg(not(feature = "s3"))]
            StorageBackend::S3 => Err(CertforgeError::Config(
                "S3 storage requires the `s3` feature".to_string(),
            )),
        }
    }

    /// Health check
    pub async fn health_check(&self) -> std::result::Result<(), StoreError> {
        match self {
            FileStorage::Local(storage) => storage.health_check().await,
            #[cfg(feature = "s3")]
            FileStorage::S3(storage) => storage.health_check().await,
        }
    }

    /// Backend name for logs and health output
    pub fn backend_name(&self) -> &'static str {
        match self {
            FileStorage::Local(_) => "local",
            #[cfg(feature = "s3")]
            FileStorage::S3(_) => "s3",
        }
    }
}

#[async_trait]
impl ArtifactStore for FileStorage {
    async fn store(
        &self,
        content: Bytes,
        suggested_name: &str,
    ) -> std::result::Result<String, StoreError> {
        match self {
            FileStorage::Local(storage) => storage.store(content, suggested_name).await,
            #[cfg(feature = "s3")]
            FileStorage::S3(storage) => storage.store(content, suggested_name).await,
        }
    }
}
