//! Unified error handling
//!
//! Application error type and the JSON envelope every endpoint speaks:
//!
//! ```json
//! { "success": true,  "message": "...", "data": { ... } }
//! { "success": false, "message": "..." }
//! ```
//!
//! | Variant | Status |
//! |------|------|
//! | Validation | 400 |
//! | NotFound | 404 |
//! | MethodNotAllowed | 405 |
//! | Database / Internal | 500 |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// API response envelope shared by all endpoints.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application error enum.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or malformed request field (400)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Missing row (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Action requested with the wrong HTTP method (405)
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Store failure (500) — logged server-side, reported generically
    #[error("Database error: {0}")]
    Database(String),

    /// Internal error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::MethodNotAllowed(msg) => (StatusCode::METHOD_NOT_ALLOWED, msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erreur serveur".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erreur serveur".to_string(),
                )
            }
        };

        let body = Json(ApiResponse::<()> {
            success: false,
            message: Some(message),
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper functions ==========

/// Successful response carrying data.
pub fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: None,
        data: Some(data),
    })
}

/// Successful response carrying only a message.
pub fn ok_message(message: impl Into<String>) -> Json<ApiResponse<()>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data: None,
    })
}

/// Successful response with both message and data.
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        message: Some(message.into()),
        data: Some(data),
    })
}
