//! Renderer errors

use crate::core::models::FailureReason;
use crate::utils::error::recovery::Retryable;
use thiserror::Error;

/// Failures of a single render call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// One or more mandatory fields are empty
    #[error("Incomplete field set, missing: {}", .missing.join(", "))]
    IncompleteFieldSet { missing: Vec<&'static str> },

    /// The template cannot be rendered with any field values
    #[error("Template malformed: {0}")]
    TemplateMalformed(String),

    /// The render call did not finish in time
    #[error("Render timed out: {0}")]
    RenderTimeout(String),

    /// The renderer failed for another reason
    #[error("Render failed: {0}")]
    RenderFailed(String),
}

impl RenderError {
    /// Per-entry failure reason recorded in a batch result
    pub fn reason(&self) -> FailureReason {
        match self {
            RenderError::IncompleteFieldSet { .. } => FailureReason::IncompleteFieldSet,
            RenderError::TemplateMalformed(_) => FailureReason::TemplateMalformed,
            RenderError::RenderTimeout(_) => FailureReason::RenderTimeout,
            RenderError::RenderFailed(_) => FailureReason::RenderFailed,
        }
    }
}

impl Retryable for RenderError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            RenderError::RenderTimeout(_) | RenderError::RenderFailed(_)
        )
    }
}
