//! Runtime knobs of the batch coordinator

use crate::config::BatchConfig;
use crate::utils::error::recovery::RetryConfig;
use std::time::Duration;

/// Per-batch processing limits
#[derive(Debug, Clone)]
pub struct BatchSettings {
    /// Entries processed at the same time; 1 means sequential
    pub max_concurrency: usize,
    /// Retry bound and backoff curve for render and store calls
    pub retry: RetryConfig,
    /// Upper bound of a single render call
    pub render_timeout: Duration,
    /// Upper bound of a single store call
    pub store_timeout: Duration,
    /// chrono format used to print the completion date
    pub date_format: String,
    /// Accepted template file extensions, lowercase
    pub template_extensions: Vec<String>,
    /// How long a finished batch stays in the registry
    pub retention: Duration,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self::from(&BatchConfig::default())
    }
}

impl From<&BatchConfig> for BatchSettings {
    fn from(config: &BatchConfig) -> Self {
        Self {
            max_concurrency: config.max_concurrency.max(1),
            retry: RetryConfig {
                max_attempts: config.max_retries.saturating_add(1),
                base_delay: Duration::from_millis(config.retry_base_delay_ms),
                max_delay: Duration::from_millis(config.retry_max_delay_ms),
                backoff_multiplier: config.backoff_multiplier,
                jitter: config.retry_jitter,
            },
            render_timeout: Duration::from_secs(config.render_timeout_seconds),
            store_timeout: Duration::from_secs(config.store_timeout_seconds),
            date_format: config.date_format.clone(),
            template_extensions: config
                .template_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            retention: Duration::from_secs(config.retention_seconds),
        }
    }
}
