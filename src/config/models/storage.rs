//! Artifact storage configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage backend selector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Local,
    S3,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::S3 => write!(f, "s3"),
        }
    }
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "s3" => Ok(StorageBackend::S3),
            other => Err(format!("Unsupported storage backend: {}", other)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default)]
    pub local: LocalStorageConfig,
    #[serde(default)]
    pub s3: S3Config,
}

/// Local file system storage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Base directory of stored artifacts
    #[serde(default = "default_storage_path")]
    pub path: String,
    /// URL prefix under which `path` is reachable
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Optional cap on stored bytes
    #[serde(default)]
    pub quota_bytes: Option<u64>,
    /// Serve `path` from the HTTP server at `/artifacts`
    #[serde(default = "default_true")]
    pub serve: bool,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            public_base_url: default_public_base_url(),
            quota_bytes: None,
            serve: true,
        }
    }
}

/// S3 configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3Config {
    /// S3 bucket name
    #[serde(default)]
    pub bucket: String,
    /// AWS region
    #[serde(default = "default_region")]
    pub region: String,
    /// Key prefix inside the bucket
    #[serde(default)]
    pub prefix: String,
    /// Public URL prefix; the virtual-hosted bucket URL when unset
    #[serde(default)]
    pub public_base_url: Option<String>,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            prefix: String::new(),
            public_base_url: None,
        }
    }
}
