//! Notification configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Batch completion notifications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    /// Log a summary line per completed batch
    #[serde(default = "default_true")]
    pub log_summary: bool,
    /// Addresses forwarded in webhook payloads
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub webhooks: Vec<WebhookEndpointConfig>,
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            log_summary: true,
            recipients: Vec::new(),
            webhooks: Vec::new(),
        }
    }
}

/// Webhook configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookEndpointConfig {
    /// Webhook URL
    pub url: String,
    /// HTTP headers to include
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// Webhook secret for signature verification
    #[serde(default)]
    pub secret: Option<String>,
    /// Timeout for webhook requests
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay between attempts in milliseconds
    #[serde(default = "default_webhook_retry_delay")]
    pub retry_delay_ms: u64,
    /// Whether webhook is enabled
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for WebhookEndpointConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            headers: HashMap::new(),
            secret: None,
            timeout_seconds: default_timeout(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_webhook_retry_delay(),
            enabled: true,
        }
    }
}
