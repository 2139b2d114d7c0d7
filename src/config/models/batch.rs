//! Batch processing configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Batch coordinator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Entries processed concurrently within one batch
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Retries per render or store call after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay in milliseconds
    #[serde(default = "default_base_delay")]
    pub retry_base_delay_ms: u64,
    /// Backoff ceiling in milliseconds
    #[serde(default = "default_max_delay")]
    pub retry_max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Randomize backoff delays
    #[serde(default = "default_true")]
    pub retry_jitter: bool,
    /// Upper bound of one render call in seconds
    #[serde(default = "default_render_timeout")]
    pub render_timeout_seconds: u64,
    /// Upper bound of one store call in seconds
    #[serde(default = "default_timeout")]
    pub store_timeout_seconds: u64,
    /// chrono format of the printed completion date
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Accepted template extensions
    #[serde(default = "default_template_extensions")]
    pub template_extensions: Vec<String>,
    /// Seconds a finished batch stays queryable before it is forgotten
    #[serde(default = "default_batch_retention")]
    pub retention_seconds: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_concurrency: default_max_concurrency(),
            max_retries: default_max_retries(),
            retry_base_delay_ms: default_base_delay(),
            retry_max_delay_ms: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            retry_jitter: true,
            render_timeout_seconds: default_render_timeout(),
            store_timeout_seconds: default_timeout(),
            date_format: default_date_format(),
            template_extensions: default_template_extensions(),
            retention_seconds: default_batch_retention(),
        }
    }
}
