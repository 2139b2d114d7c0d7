//! HTTP response mapping for certforge errors

use super::types::CertforgeError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Error body returned by the HTTP API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
}

/// Machine-readable error detail
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CertforgeError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            CertforgeError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            CertforgeError::HttpClient(_) => (StatusCode::BAD_GATEWAY, "HTTP_CLIENT_ERROR"),
            CertforgeError::Serialization(_) | CertforgeError::Yaml(_) => {
                (StatusCode::BAD_REQUEST, "SERIALIZATION_ERROR")
            }
            CertforgeError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            CertforgeError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            CertforgeError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            CertforgeError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            CertforgeError::NotYetCompleted(_) => (StatusCode::CONFLICT, "NOT_YET_COMPLETED"),
            CertforgeError::BatchFailed { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "BATCH_FAILED")
            }
            CertforgeError::Roster(_) => (StatusCode::BAD_GATEWAY, "ROSTER_ERROR"),
            CertforgeError::Render(_) => (StatusCode::BAD_GATEWAY, "RENDER_ERROR"),
            CertforgeError::Store(_) => (StatusCode::BAD_GATEWAY, "STORE_ERROR"),
            CertforgeError::Notification(_) => (StatusCode::BAD_GATEWAY, "NOTIFICATION_ERROR"),
            CertforgeError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMEOUT"),
            CertforgeError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl ResponseError for CertforgeError {
    fn status_code(&self) -> StatusCode {
        self.status_and_code().0
    }

    fn error_response(&self) -> HttpResponse {
        let (status, code) = self.status_and_code();

        let details = match self {
            CertforgeError::BatchFailed { batch_id, failure } => Some(serde_json::json!({
                "batch_id": batch_id,
                "reason": failure,
            })),
            _ => None,
        };

        HttpResponse::build(status).json(ErrorResponse {
            success: false,
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details,
            },
        })
    }
}
