/// Error types for Blog Service
///
/// Every handler returns `Result<HttpResponse, AppError>`; the `ResponseError`
/// impl below is the single place where failures become HTTP responses.
use crate::models::{field_errors, FieldErrors};
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// No identity could be resolved for the request
    #[error("Unauthorized")]
    Unauthorized,

    /// Payload violates a post invariant
    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// Request body could not be parsed at all
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            AppError::Unauthorized => HttpResponse::build(status).json(serde_json::json!({})),
            AppError::Validation(fields) => HttpResponse::build(status).json(fields),
            AppError::BadRequest(msg) => HttpResponse::build(status).json(serde_json::json!({
                "error": msg,
                "status": status.as_u16(),
            })),
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                HttpResponse::build(status).json(serde_json::json!({
                    "error": "Internal server error",
                    "status": status.as_u16(),
                }))
            }
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(field_errors(&errors))
    }
}
