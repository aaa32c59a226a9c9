// crates/backend-lib/src/error.rs

//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Incorrect password")]
    InvalidCredential,

    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request body too large")]
    PayloadTooLarge,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidCredential => StatusCode::UNAUTHORIZED,
            AppError::DuplicateUsername(_) => StatusCode::CONFLICT,
            AppError::InvalidId(_) | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Persistence(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NF_001",
            AppError::InvalidCredential => "AUTH_001",
            AppError::DuplicateUsername(_) => "AUTH_002",
            AppError::Persistence(_) => "STORE_001",
            AppError::InvalidId(_) => "VAL_002",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::PayloadTooLarge => "VAL_003",
            AppError::Internal(_) => "INT_001",
        }
    }

    /// Get a sanitized message suitable for production use
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::NotFound(_) => "Resource not found".to_string(),
            AppError::InvalidCredential => "Authentication failed".to_string(),
            AppError::DuplicateUsername(_) => "Username already taken".to_string(),
            AppError::Persistence(_) => "Storage error".to_string(),
            AppError::InvalidId(_) => "Invalid resource identifier".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::PayloadTooLarge => "Request body too large".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
        }
    }

    /// Message sent to clients: detailed in debug builds, sanitized otherwise
    pub fn client_message(&self) -> String {
        if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        let body = serde_json::json!({
            "error": self.client_message(),
            "code": self.error_code(),
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Internal(format!("Background task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_app_error_display() {
        let err = AppError::DuplicateUsername("alice".to_string());
        assert_eq!(err.to_string(), "Username already taken: alice");

        assert_eq!(AppError::InvalidCredential.to_string(), "Incorrect password");

        let io_error: AppError = IoError::new(ErrorKind::NotFound, "File not found").into();
        assert!(io_error.to_string().contains("Persistence error"));
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            AppError::NotFound("box".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::InvalidCredential.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::DuplicateUsername("alice".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::InvalidId("xyz".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Persistence("disk full".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_from_impls() {
        let json_err: serde_json::Error =
            serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert!(matches!(app_err, AppError::Persistence(_)));
        assert_eq!(app_err.error_code(), "STORE_001");
    }

    #[tokio::test]
    async fn test_error_serialization() {
        let response = AppError::NotFound("box 42".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response
            .headers()
            .get("content-type")
            .unwrap()
            .to_str()
            .unwrap()
            .contains("application/json"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["code"], "NF_001");
        assert!(body["error"].is_string());
    }
}
