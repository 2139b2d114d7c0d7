//! Error types for certforge

use crate::core::models::BatchFailure;
use crate::core::renderer::RenderError;
use crate::core::roster::RosterError;
use crate::storage::files::StoreError;
use thiserror::Error;
use uuid::Uuid;

/// Result type alias for certforge
pub type Result<T> = std::result::Result<T, CertforgeError>;

/// Main error type for certforge
#[derive(Error, Debug)]
pub enum CertforgeError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A batch result was requested before the batch completed
    #[error("Batch not yet completed: {0}")]
    NotYetCompleted(String),

    /// A batch was aborted before processing started
    #[error("Batch {batch_id} failed: {failure}")]
    BatchFailed {
        batch_id: Uuid,
        failure: BatchFailure,
    },

    /// Roster source errors
    #[error(transparent)]
    Roster(#[from] RosterError),

    /// Template renderer errors
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Artifact store errors
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Notification sink errors
    #[error("Notification error: {0}")]
    Notification(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
