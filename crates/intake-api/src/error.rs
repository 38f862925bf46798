// ============================================================================
// Intake API - Error Mapping
// File: crates/intake-api/src/error.rs
// ============================================================================
//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use intake_core::DomainError;
use intake_security::JwtError;

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<JwtError> for ApiError {
    fn from(e: JwtError) -> Self {
        ApiError::Unauthorized(e.to_string())
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Domain(e) => match e {
                DomainError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
                DomainError::NoOrganization(_) => (StatusCode::FORBIDDEN, "NO_ORGANIZATION"),
                DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
                DomainError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
                DomainError::DocumentNotFound(_) => (StatusCode::NOT_FOUND, "DOCUMENT_NOT_FOUND"),
                DomainError::InvalidRejectionReason(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_REJECTION_REASON")
                }
                DomainError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                DomainError::InvalidStatusTransition { .. } => {
                    (StatusCode::CONFLICT, "INVALID_STATUS_TRANSITION")
                }
                DomainError::DocumentsNotProcessed { .. } => {
                    (StatusCode::CONFLICT, "DOCUMENTS_NOT_PROCESSED")
                }
                DomainError::DatabaseError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR")
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();

        let message = if status.is_server_error() {
            tracing::error!(code, "Request failed: {}", self);
            "Internal server error".to_string()
        } else {
            tracing::warn!(code, "Request rejected: {}", self);
            self.to_string()
        };

        (status, Json(ApiResponse::<()>::error(code, &message))).into_response()
    }
}
