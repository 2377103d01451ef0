//! Unified error handling for the accounts service

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Structural rejection of an operation the API never supports,
    /// regardless of who asks (e.g. direct employee creation).
    #[error("Method not supported: {0}")]
    MethodNotSupported(String),

    /// Unknown or already-consumed invitation token.
    #[error("Invalid invitation: {0}")]
    InvalidInvitation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Outbound notification relay failure. Call sites log this and
    /// carry on; it never fails the transition that triggered it.
    #[error("Notification dispatch failed: {0}")]
    NotificationDispatch(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg.clone()),
            AppError::MethodNotSupported(msg) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_supported",
                msg.clone(),
            ),
            AppError::InvalidInvitation(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_invitation", msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation", msg.clone())
            }
            AppError::NotificationDispatch(msg) => {
                tracing::error!("Notification dispatch error: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "notification_error",
                    "Notification relay error".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Jwt(e) => {
                tracing::error!("JWT error: {:?}", e);
                (
                    StatusCode::UNAUTHORIZED,
                    "jwt_error",
                    "Invalid or expired token".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::Forbidden("role check failed".to_string());
        assert_eq!(err.to_string(), "Forbidden: role check failed");
    }

    #[test]
    fn test_invalid_invitation_display() {
        let err = AppError::InvalidInvitation("token already used".to_string());
        assert_eq!(err.to_string(), "Invalid invitation: token already used");
    }

    #[test]
    fn test_error_conversion() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_structural_rejection_distinct_from_denial() {
        let structural = AppError::MethodNotSupported("no direct create".to_string());
        assert!(matches!(structural, AppError::MethodNotSupported(_)));
        assert!(!matches!(structural, AppError::Forbidden(_)));
    }
}
