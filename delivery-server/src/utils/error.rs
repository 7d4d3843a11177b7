//! Unified error handling
//!
//! Application-level error type returned by every API handler. Domain
//! errors ([`OrderError`], [`TrackingError`]) convert into [`AppError`]
//! so handlers can use `?` throughout.
//!
//! # Error codes
//!
//! | Code  | Category |
//! |-------|----------|
//! | E1001 | Resource not found |
//! | E1002 | Validation failed |
//! | E1003 | Business rule violation |
//! | E1004 | Conflict |
//! | E0001 | Internal error |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::orders::OrderError;
use crate::tracking::TrackingError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Business rule violation: {0}")]
    BusinessRule(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn business_rule(msg: impl Into<String>) -> Self {
        AppError::BusinessRule(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

/// JSON body returned for every error response
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "E1001", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "E1002", msg.clone()),
            AppError::BusinessRule(msg) => (StatusCode::BAD_REQUEST, "E1003", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "E1004", msg.clone()),
            AppError::Internal(msg) => {
                // Log internal errors without exposing details to the client
                error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "E0001",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse { code, message };
        (status, Json(body)).into_response()
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::UnknownOrder(_) => AppError::NotFound(err.to_string()),
            OrderError::InvalidItem(_)
            | OrderError::InvalidSplitConfiguration(_)
            | OrderError::InvalidSplitEntry(_) => AppError::Validation(err.to_string()),
        }
    }
}

impl From<TrackingError> for AppError {
    fn from(err: TrackingError) -> Self {
        match err {
            TrackingError::UnknownOrder(_) => AppError::NotFound(err.to_string()),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers
pub type AppResult<T> = std::result::Result<T, AppError>;
