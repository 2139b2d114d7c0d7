//! Conversions from component errors into the crate error

use super::types::CertforgeError;
use crate::core::catalog::CatalogError;
use crate::core::notify::NotificationError;
use crate::utils::error::recovery::Elapsed;

impl From<CatalogError> for CertforgeError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => CertforgeError::NotFound(format!("Training {}", id)),
            CatalogError::Validation(msg) => CertforgeError::Validation(msg),
        }
    }
}

impl From<NotificationError> for CertforgeError {
    fn from(err: NotificationError) -> Self {
        CertforgeError::Notification(err.to_string())
    }
}

impl From<Elapsed> for CertforgeError {
    fn from(err: Elapsed) -> Self {
        CertforgeError::Timeout(err.to_string())
    }
}
