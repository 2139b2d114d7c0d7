//! Configuration management for certforge
//!
//! Configuration is read from a YAML file, then overridden by `CERTFORGE_*`
//! environment variables, then validated section by section.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{CertforgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "CERTFORGE_";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file, apply environment overrides, validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| CertforgeError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Defaults plus environment overrides, validated
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse YAML without overrides or validation
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| CertforgeError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `CERTFORGE_*` variables from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Apply overrides from `lookup`, which receives keys without the prefix
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_override("PORT", &port)?;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            self.logging.format = match format.to_ascii_lowercase().as_str() {
                "json" => LogFormat::Json,
                "text" => LogFormat::Text,
                other => {
                    return Err(CertforgeError::Config(format!(
                        "Invalid {}LOG_FORMAT: {}",
                        ENV_PREFIX, other
                    )));
                }
            };
        }
        if let Some(value) = lookup("MAX_CONCURRENCY") {
            self.batch.max_concurrency = parse_override("MAX_CONCURRENCY", &value)?;
        }
        if let Some(value) = lookup("MAX_RETRIES") {
            self.batch.max_retries = parse_override("MAX_RETRIES", &value)?;
        }
        if let Some(value) = lookup("BATCH_RETENTION_SECONDS") {
            self.batch.retention_seconds = parse_override("BATCH_RETENTION_SECONDS", &value)?;
        }
        if let Some(endpoint) = lookup("RENDERER_ENDPOINT") {
            self.renderer.endpoint = endpoint;
        }
        if let Some(api_key) = lookup("RENDERER_API_KEY") {
            self.renderer.api_key = Some(api_key);
        }
        if let Some(backend) = lookup("STORAGE_BACKEND") {
            self.storage.backend = backend.parse().map_err(CertforgeError::Config)?;
        }
        if let Some(path) = lookup("STORAGE_PATH") {
            self.storage.local.path = path;
        }
        if let Some(url) = lookup("PUBLIC_BASE_URL") {
            self.storage.local.public_base_url = url;
        }
        if let Some(bucket) = lookup("S3_BUCKET") {
            self.storage.s3.bucket = bucket;
        }
        if let Some(region) = lookup("S3_REGION") {
            self.storage.s3.region = region;
        }
        if let Some(url) = lookup("WEBHOOK_URL") {
            let secret = lookup("WEBHOOK_SECRET");
            self.notifications.webhooks.push(WebhookEndpointConfig {
                url,
                secret,
                ..WebhookEndpointConfig::default()
            });
        }
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        let sections: [(&str, &dyn Validate); 8] = [
            ("Server", &self.server),
            ("Batch", &self.batch),
            ("Roster", &self.roster),
            ("Renderer", &self.renderer),
            ("Storage", &self.storage),
            ("Notifications", &self.notifications),
            ("Catalog", &self.catalog),
            ("Logging", &self.logging),
        ];

        for (name, section) in sections {
            section
                .validate()
                .map_err(|e| CertforgeError::Config(format!("{} config error: {}", name, e)))?;
        }

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            CertforgeError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}

fn parse_override<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CertforgeError::Config(format!("Invalid {}{}: {}", ENV_PREFIX, key, value))
    })
}
