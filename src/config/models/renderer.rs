//! Renderer configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Conversion service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Conversion endpoint receiving the multipart render request
    #[serde(default = "default_renderer_endpoint")]
    pub endpoint: String,
    /// Bearer token sent to the endpoint
    #[serde(default)]
    pub api_key: Option<String>,
    /// HTTP client timeout in seconds
    #[serde(default = "default_render_timeout")]
    pub timeout_seconds: u64,
    /// Requests in flight to the endpoint across all batches
    #[serde(default = "default_renderer_concurrency")]
    pub max_concurrent_requests: usize,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            endpoint: default_renderer_endpoint(),
            api_key: None,
            timeout_seconds: default_render_timeout(),
            max_concurrent_requests: default_renderer_concurrency(),
        }
    }
}
