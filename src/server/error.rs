//! Web Host Error Types
//!
//! Errors from the web host and their conversion to JSON responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad path or query parameter
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error (bind failures, missing frontend build)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: String,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ServerError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ServerError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "request failed"
            );
        } else {
            tracing::debug!(request_id = %request_id, error_code = %code, "{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServerError::NotFound("x".into()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServerError::Internal("x".into()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
