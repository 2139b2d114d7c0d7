//! Local file system artifact store

use crate::config::LocalStorageConfig;
use crate::utils::error::{CertforgeError, Result};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::fs;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::error::StoreError;
use super::types::ArtifactMetadata;
use super::{ArtifactStore, detect_content_type, sanitize_name};

const METADATA_SUFFIX: &str = ".meta";

/// Local artifact storage laid out as `<base>/<artifact-id>/<name>`
#[derive(Debug, Clone)]
pub struct LocalArtifactStore {
    base_path: PathBuf,
    public_base_url: String,
    quota_bytes: Option<u64>,
    used_bytes: Arc<AtomicU64>,
}

impl LocalArtifactStore {
    /// Create a new local store, creating the base directory if needed
    pub async fn new(config: &LocalStorageConfig) -> Result<Self> {
        let path = PathBuf::from(&config.path);

        if !path.exists() {
            fs::create_dir_all(&path).await.map_err(|e| {
                CertforgeError::Config(format!(
                    "Failed to create storage directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }

        let used = usage_of(&path).await?;
        info!(
            "Local artifact storage initialized at: {} ({} bytes in use)",
            path.display(),
            used
        );

        Ok(Self {
            base_path: path,
            public_base_url: config.public_base_url.trim_end_matches('/').to_string(),
            quota_bytes: config.quota_bytes,
            used_bytes: Arc::new(AtomicU64::new(used)),
        })
    }

    /// Directory served as the public artifact root
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Bytes currently accounted against the quota
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes.load(Ordering::Acquire)
    }

    /// Read back a stored artifact
    pub async fn get(
        &self,
        artifact_id: &str,
        name: &str,
    ) -> std::result::Result<Bytes, StoreError> {
        let path = self.artifact_path(artifact_id, name);
        fs::read(&path).await.map(Bytes::from).map_err(|e| {
            StoreError::StoreUnavailable(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    /// Read the metadata sidecar of a stored artifact
    pub async fn metadata(
        &self,
        artifact_id: &str,
        name: &str,
    ) -> std::result::Result<ArtifactMetadata, StoreError> {
        let path = self.metadata_path(artifact_id, name);
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to read metadata: {}", e)))?;

        serde_json::from_str(&content)
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to parse metadata: {}", e)))
    }

    /// Health check
    pub async fn health_check(&self) -> std::result::Result<(), StoreError> {
        if !self.base_path.exists() {
            return Err(StoreError::StoreUnavailable(
                "Storage directory does not exist".to_string(),
            ));
        }

        let probe = self.base_path.join(".health_check");
        fs::write(&probe, b"health_check")
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("Storage not writable: {}", e)))?;

        let _ = fs::remove_file(&probe).await;
        Ok(())
    }

    fn artifact_path(&self, artifact_id: &str, name: &str) -> PathBuf {
        self.base_path.join(artifact_id).join(name)
    }

    fn metadata_path(&self, artifact_id: &str, name: &str) -> PathBuf {
        self.base_path
            .join(artifact_id)
            .join(format!("{}{}", name, METADATA_SUFFIX))
    }

    fn public_url(&self, artifact_id: &str, name: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, artifact_id, name)
    }

    /// Reserve `size` bytes against the quota for the artifact directory `dir`
    fn reserve(&self, size: u64, dir: PathBuf) -> std::result::Result<Reservation, StoreError> {
        let Some(quota) = self.quota_bytes else {
            self.used_bytes.fetch_add(size, Ordering::AcqRel);
            return Ok(Reservation::new(self.used_bytes.clone(), size, dir));
        };

        self.used_bytes
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                used.checked_add(size).filter(|total| *total <= quota)
            })
            .map(|_| Reservation::new(self.used_bytes.clone(), size, dir))
            .map_err(|used| {
                StoreError::QuotaExceeded(format!(
                    "{} bytes requested, {} of {} bytes in use",
                    size, used, quota
                ))
            })
    }

    async fn write_artifact(
        &self,
        artifact_id: &str,
        name: &str,
        content: &[u8],
    ) -> std::result::Result<(), StoreError> {
        let dir = self.base_path.join(artifact_id);
        fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to create directory: {}", e)))?;

        fs::write(self.artifact_path(artifact_id, name), content)
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to write file: {}", e)))?;

        let metadata = ArtifactMetadata {
            id: artifact_id.to_string(),
            filename: name.to_string(),
            content_type: detect_content_type(name).to_string(),
            size: content.len() as u64,
            created_at: chrono::Utc::now(),
            checksum: calculate_checksum(content),
        };

        let sidecar = serde_json::to_string_pretty(&metadata).map_err(|e| {
            StoreError::StoreUnavailable(format!("Failed to serialize metadata: {}", e))
        })?;

        fs::write(self.metadata_path(artifact_id, name), sidecar)
            .await
            .map_err(|e| StoreError::StoreUnavailable(format!("Failed to write metadata: {}", e)))
    }
}

#[async_trait]
impl ArtifactStore for LocalArtifactStore {
    async fn store(
        &self,
        content: Bytes,
        suggested_name: &str,
    ) -> std::result::Result<String, StoreError> {
        let artifact_id = Uuid::new_v4().to_string();
        let name = sanitize_name(suggested_name);
        let reservation = self.reserve(content.len() as u64, self.base_path.join(&artifact_id))?;

        // Dropping `reservation` before commit (error or cancelled future) gives the
        // bytes back and removes the partial artifact directory.
        if let Err(e) = self.write_artifact(&artifact_id, &name, &content).await {
            warn!("Failed to store artifact {}: {}", name, e);
            return Err(e);
        }
        reservation.commit();

        debug!("Artifact stored: {} -> {}", name, artifact_id);
        Ok(self.public_url(&artifact_id, &name))
    }
}

/// Quota bytes held for an artifact that is still being written
struct Reservation {
    used_bytes: Arc<AtomicU64>,
    size: u64,
    dir: PathBuf,
    committed: bool,
}

impl Reservation {
    fn new(used_bytes: Arc<AtomicU64>, size: u64, dir: PathBuf) -> Self {
        Self {
            used_bytes,
            size,
            dir,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        if self.committed {
            return;
        }

        self.used_bytes.fetch_sub(self.size, Ordering::AcqRel);
        debug!("Released {} reserved bytes for {}", self.size, self.dir.display());

        let dir = std::mem::take(&mut self.dir);
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let _ = fs::remove_dir_all(&dir).await;
                });
            }
            Err(_) => {
                let _ = std::fs::remove_dir_all(&dir);
            }
        }
    }
}

/// Calculate file checksum
fn calculate_checksum(content: &[u8]) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

/// Sum the sizes of stored artifacts under `base`, ignoring sidecars
async fn usage_of(base: &Path) -> Result<u64> {
    let mut total = 0;
    let mut artifacts = fs::read_dir(base).await?;

    while let Some(entry) = artifacts.next_entry().await? {
        if !entry.file_type().await?.is_dir() {
            continue;
        }

        let mut files = fs::read_dir(entry.path()).await?;
        while let Some(file) = files.next_entry().await? {
            let is_sidecar = file
                .file_name()
                .to_string_lossy()
                .ends_with(METADATA_SUFFIX);
            if !is_sidecar {
                total += file.metadata().await?.len();
            }
        }
    }

    Ok(total)
}
