//! Error types for the cats service.

use account_store::StoreError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Service error types.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Account already registered: {0}")]
    DuplicateAccount(String),

    #[error("Account store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Registration timed out after {0:?}")]
    TimedOut(Duration),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("404 not found error")]
    NotFound,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ServiceError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ServiceError::DuplicateAccount(_) => (StatusCode::BAD_REQUEST, "DUPLICATE_ACCOUNT"),
            ServiceError::StoreUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
            }
            ServiceError::TimedOut(_) => (StatusCode::GATEWAY_TIMEOUT, "TIMED_OUT"),
            ServiceError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ServiceError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        match e {
            // A conflict raised by the store is the authoritative duplicate signal.
            StoreError::Conflict(email) => ServiceError::DuplicateAccount(email),
            other => ServiceError::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Validation(rejection.body_text())
    }
}

impl From<bcrypt::BcryptError> for ServiceError {
    fn from(e: bcrypt::BcryptError) -> Self {
        ServiceError::Internal(format!("Credential hashing failed: {}", e))
    }
}
