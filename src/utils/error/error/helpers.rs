//! Helper functions for creating specific error types

use super::types::CertforgeError;

impl CertforgeError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    pub fn not_yet_completed<S: Into<String>>(message: S) -> Self {
        Self::NotYetCompleted(message.into())
    }

    /// Whether this error was caused by the caller's input rather than a fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::NotFound(_)
                | Self::BadRequest(_)
                | Self::NotYetCompleted(_)
                | Self::BatchFailed { .. }
        )
    }
}
