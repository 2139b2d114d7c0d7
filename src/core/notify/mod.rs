//! Batch completion notifications
//!
//! Sinks are told about every completed batch. Delivery is best-effort: a
//! failing sink never changes the batch outcome.

mod fanout;
mod summary;
mod types;
mod webhook;

pub use fanout::FanoutNotifier;
pub use summary::TracingNotifier;
pub use types::{BatchSummary, NotificationEventType, NotificationPayload};
pub use webhook::{SIGNATURE_HEADER, WebhookNotifier, generate_signature};

use crate::config::NotificationsConfig;
use crate::core::models::BatchResult;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Notification delivery errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Endpoint unreachable or answered with a non-2xx status
    #[error("Delivery to {url} failed: {message}")]
    Delivery { url: String, message: String },

    /// Payload could not be encoded
    #[error("Payload serialization failed: {0}")]
    Serialization(String),

    /// Payload could not be signed
    #[error("Payload signing failed: {0}")]
    Signature(String),

    /// Several sinks failed
    #[error("{} notification sinks failed: {}", .0.len(), .0.join("; "))]
    Multiple(Vec<String>),
}

/// Receives the final report of every completed batch
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, result: &BatchResult) -> std::result::Result<(), NotificationError>;
}

/// Build the sink described by configuration
pub fn build_notifier(config: &NotificationsConfig) -> Result<Arc<dyn NotificationSink>> {
    let mut sinks: Vec<Arc<dyn NotificationSink>> = Vec::new();

    if config.log_summary {
        sinks.push(Arc::new(TracingNotifier::new()));
    }

    let webhooks: Vec<_> = config.webhooks.iter().filter(|w| w.enabled).cloned().collect();
    if !webhooks.is_empty() {
        sinks.push(Arc::new(WebhookNotifier::new(
            webhooks,
            config.recipients.clone(),
        )?));
    }

    Ok(Arc::new(FanoutNotifier::new(sinks)))
}
