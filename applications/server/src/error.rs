//! Server error types and HTTP response mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mixtape_core::MixtapeError;
use serde_json::json;
use thiserror::Error;

/// Server error type covering all failure modes
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] MixtapeError),

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, ServerError>;

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ServerError::Jwt(_) => (StatusCode::UNAUTHORIZED, "Invalid token".to_string()),
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServerError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ServerError::Core(err) => return core_error_response(err),
            ServerError::Bcrypt(err) => {
                tracing::error!("Password hashing error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Config(msg) | ServerError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ServerError::Io(err) => {
                tracing::error!("IO error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn core_error_response(err: &MixtapeError) -> Response {
    let (status, message) = match err {
        MixtapeError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        MixtapeError::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        MixtapeError::PermissionDenied(msg) => (StatusCode::FORBIDDEN, msg.clone()),
        MixtapeError::NotFound { entity, .. } => {
            (StatusCode::NOT_FOUND, format!("{entity} not found"))
        }
        // Deliberately indistinguishable from a missing resource
        MixtapeError::NotFoundOrUnauthorized => (
            StatusCode::NOT_FOUND,
            "Request not found or not addressed to you".to_string(),
        ),
        MixtapeError::Upload(msg) => {
            tracing::error!("Upload failed: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "File upload failed".to_string(),
            )
        }
        MixtapeError::Database(msg) => {
            tracing::error!("Database error: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        MixtapeError::Io(err) => {
            tracing::error!("IO error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        MixtapeError::Serialization(err) => {
            tracing::error!("Serialization error: {err}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        MixtapeError::Other(msg) => {
            tracing::error!("Unexpected error: {msg}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
    };

    (status, Json(json!({ "error": message }))).into_response()
}
