//! Artifact store errors

use crate::core::models::FailureReason;
use crate::utils::error::recovery::Retryable;
use thiserror::Error;

/// Failures of a single store call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be reached or refused the write
    #[error("Artifact store unavailable: {0}")]
    StoreUnavailable(String),

    /// The write would exceed the configured storage quota
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),
}

impl StoreError {
    /// Per-entry failure reason recorded in a batch result
    pub fn reason(&self) -> FailureReason {
        match self {
            StoreError::StoreUnavailable(_) => FailureReason::StoreUnavailable,
            StoreError::QuotaExceeded(_) => FailureReason::QuotaExceeded,
        }
    }
}

impl Retryable for StoreError {
    fn is_retryable(&self) -> bool {
        matches!(self, StoreError::StoreUnavailable(_))
    }
}
