//! Webhook notification delivery

use super::types::NotificationPayload;
use super::{NotificationError, NotificationSink};
use crate::config::WebhookEndpointConfig;
use crate::core::models::BatchResult;
use crate::utils::error::recovery::{RetryConfig, RetryPolicy};
use crate::utils::error::{CertforgeError, Result};
use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

/// Header carrying the HMAC-SHA256 payload signature
pub const SIGNATURE_HEADER: &str = "X-Certforge-Signature";

/// Posts a signed JSON payload to every configured endpoint
#[derive(Debug, Clone)]
pub struct WebhookNotifier {
    client: Client,
    endpoints: Vec<WebhookEndpointConfig>,
    recipients: Vec<String>,
}

impl WebhookNotifier {
    /// Create a new webhook notifier
    pub fn new(endpoints: Vec<WebhookEndpointConfig>, recipients: Vec<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("certforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                CertforgeError::Config(format!("Failed to create webhook HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            endpoints,
            recipients,
        })
    }

    async fn deliver(
        &self,
        endpoint: &WebhookEndpointConfig,
        body: &str,
    ) -> std::result::Result<(), NotificationError> {
        let policy = RetryPolicy::new(RetryConfig {
            max_attempts: endpoint.max_retries.saturating_add(1),
            base_delay: Duration::from_millis(endpoint.retry_delay_ms),
            max_delay: Duration::from_millis(endpoint.retry_delay_ms),
            backoff_multiplier: 1.0,
            jitter: false,
        });

        let signature = endpoint
            .secret
            .as_deref()
            .map(|secret| generate_signature(body, secret))
            .transpose()?;
        let signature = signature.as_deref();

        policy
            .call(|| async move {
                let mut request = self
                    .client
                    .post(&endpoint.url)
                    .timeout(Duration::from_secs(endpoint.timeout_seconds))
                    .header("Content-Type", "application/json");

                for (key, value) in &endpoint.headers {
                    request = request.header(key, value);
                }
                if let Some(signature) = signature {
                    request = request.header(SIGNATURE_HEADER, signature);
                }

                let response = request.body(body.to_string()).send().await.map_err(|e| {
                    NotificationError::Delivery {
                        url: endpoint.url.clone(),
                        message: e.to_string(),
                    }
                })?;

                let status = response.status();
                if status.is_success() {
                    debug!("Webhook delivered: {}", endpoint.url);
                    Ok(())
                } else {
                    let detail = response.text().await.unwrap_or_default();
                    Err(NotificationError::Delivery {
                        url: endpoint.url.clone(),
                        message: format!("status {}: {}", status.as_u16(), detail),
                    })
                }
            })
            .await
    }
}

#[async_trait]
impl NotificationSink for WebhookNotifier {
    async fn notify(&self, result: &BatchResult) -> std::result::Result<(), NotificationError> {
        let payload = NotificationPayload::batch_completed(result, self.recipients.clone());
        let body = serde_json::to_string(&payload)
            .map_err(|e| NotificationError::Serialization(e.to_string()))?;

        let outcomes = join_all(
            self.endpoints
                .iter()
                .map(|endpoint| self.deliver(endpoint, &body)),
        )
        .await;

        let failures: Vec<String> = outcomes
            .into_iter()
            .filter_map(|outcome| outcome.err())
            .inspect(|e| error!("Webhook delivery failed permanently: {}", e))
            .map(|e| e.to_string())
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(NotificationError::Multiple(failures))
        }
    }
}

/// Sign a payload body as `sha256=<hex hmac>`
pub fn generate_signature(
    body: &str,
    secret: &str,
) -> std::result::Result<String, NotificationError> {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| NotificationError::Signature(e.to_string()))?;

    mac.update(body.as_bytes());
    Ok(format!("sha256={}", hex::encode(mac.finalize().into_bytes())))
}
