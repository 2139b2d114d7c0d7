//! Section validators

use super::trait_def::Validate;
use crate::config::models::*;
use chrono::format::{Item, StrftimeItems};
use tracing::debug;
use url::Url;

fn http_url(value: &str, what: &str) -> Result<(), String> {
    let url = Url::parse(value)
        .map_err(|e| format!("{} '{}' is not a valid URL: {}", what, value, e))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(format!("{} must use http or https, got '{}'", what, scheme)),
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating server configuration");

        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Worker count must be greater than 0".to_string());
            }
            if workers > 1000 {
                return Err("Worker count seems too high (>1000)".to_string());
            }
        }

        if self.timeout == 0 {
            return Err("Server timeout must be greater than 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size must be greater than 0".to_string());
        }

        if self.max_body_size > 1024 * 1024 * 100 {
            return Err("Max body size should not exceed 100MB".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_concurrency == 0 {
            return Err("max_concurrency must be at least 1".to_string());
        }

        if self.max_retries > 10 {
            return Err("max_retries should not exceed 10".to_string());
        }

        if self.retry_base_delay_ms > self.retry_max_delay_ms {
            return Err("retry_base_delay_ms cannot exceed retry_max_delay_ms".to_string());
        }

        if self.backoff_multiplier.is_nan() || self.backoff_multiplier < 1.0 {
            return Err("backoff_multiplier must be at least 1.0".to_string());
        }

        if self.render_timeout_seconds == 0 || self.store_timeout_seconds == 0 {
            return Err("Render and store timeouts must be greater than 0".to_string());
        }

        let date_format_ok = !self.date_format.is_empty()
            && StrftimeItems::new(&self.date_format).all(|item| !matches!(item, Item::Error));
        if !date_format_ok {
            return Err(format!("Invalid date_format '{}'", self.date_format));
        }

        if self.template_extensions.iter().all(|ext| ext.trim().is_empty()) {
            return Err("At least one template extension must be accepted".to_string());
        }

        Ok(())
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("Roster timeout must be greater than 0".to_string());
        }
        http_url(&self.export_base_url, "Roster export_base_url")
    }
}

impl Validate for RendererConfig {
    fn validate(&self) -> Result<(), String> {
        http_url(&self.endpoint, "Renderer endpoint")?;

        if self.timeout_seconds == 0 {
            return Err("Renderer timeout must be greater than 0".to_string());
        }

        if self.max_concurrent_requests == 0 {
            return Err("Renderer max_concurrent_requests must be at least 1".to_string());
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        match self.backend {
            StorageBackend::Local => {
                if self.local.path.trim().is_empty() {
                    return Err("Local storage path cannot be empty".to_string());
                }
                if self.local.quota_bytes == Some(0) {
                    return Err("Storage quota must be greater than 0 when set".to_string());
                }
                http_url(&self.local.public_base_url, "Storage public_base_url")
            }
            StorageBackend::S3 => {
                if self.s3.bucket.trim().is_empty() {
                    return Err("S3 bucket cannot be empty".to_string());
                }
                if self.s3.region.trim().is_empty() {
                    return Err("S3 region cannot be empty".to_string());
                }
                match &self.s3.public_base_url {
                    Some(url) => http_url(url, "S3 public_base_url"),
                    None => Ok(()),
                }
            }
        }
    }
}

impl Validate for NotificationsConfig {
    fn validate(&self) -> Result<(), String> {
        for webhook in &self.webhooks {
            webhook.validate()?;
        }
        Ok(())
    }
}

impl Validate for WebhookEndpointConfig {
    fn validate(&self) -> Result<(), String> {
        http_url(&self.url, "Webhook URL")?;

        if self.timeout_seconds == 0 {
            return Err("Webhook timeout must be greater than 0".to_string());
        }

        if self.secret.as_deref().is_some_and(str::is_empty) {
            return Err("Webhook secret cannot be empty when set".to_string());
        }

        Ok(())
    }
}

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        for training in &self.trainings {
            if training.name.trim().is_empty() {
                return Err("Seed training name cannot be empty".to_string());
            }
            if training.workload == 0 {
                return Err(format!(
                    "Seed training '{}' must have a workload greater than 0",
                    training.name
                ));
            }
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map(|_| ())
            .map_err(|e| format!("Invalid log level '{}': {}", self.level, e))
    }
}
