//! Configuration data models
//!
//! This module defines all configuration structures used by certforge.

#![allow(missing_docs)]

pub mod batch;
pub mod catalog;
pub mod logging;
pub mod notifications;
pub mod renderer;
pub mod roster;
pub mod server;
pub mod storage;

pub use batch::*;
pub use catalog::*;
pub use logging::*;
pub use notifications::*;
pub use renderer::*;
pub use roster::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8080
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    25 * 1024 * 1024 // 25MB
}

pub fn default_true() -> bool {
    true
}

pub fn default_max_concurrency() -> usize {
    4
}

pub fn default_max_retries() -> u32 {
    2
}

pub fn default_base_delay() -> u64 {
    200
}

pub fn default_max_delay() -> u64 {
    5000
}

pub fn default_backoff_multiplier() -> f64 {
    2.0
}

pub fn default_render_timeout() -> u64 {
    120
}

pub fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

pub fn default_template_extensions() -> Vec<String> {
    vec!["pptx".to_string()]
}

pub fn default_batch_retention() -> u64 {
    24 * 60 * 60 // one day
}

pub fn default_sheets_base_url() -> String {
    "https://docs.google.com".to_string()
}

pub fn default_renderer_endpoint() -> String {
    "http://localhost:3000/convert".to_string()
}

pub fn default_renderer_concurrency() -> usize {
    8
}

pub fn default_storage_path() -> String {
    "./data/artifacts".to_string()
}

pub fn default_public_base_url() -> String {
    "http://localhost:8080/artifacts".to_string()
}

pub fn default_region() -> String {
    "us-east-1".to_string()
}

pub fn default_webhook_retry_delay() -> u64 {
    1000
}

pub fn default_log_level() -> String {
    "info".to_string()
}
