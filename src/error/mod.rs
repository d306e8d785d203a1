//! Application error taxonomy and its HTTP mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level errors.
///
/// Security-sensitive variants carry fixed client-facing messages; the
/// infrastructure variants all collapse to a generic 500 body, with the
/// real cause logged server-side when the response is built.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Db(#[from] sqlx::Error),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authorization header missing or malformed")]
    TokenMissing,

    #[error("Token verification failed")]
    InvalidToken,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Password hashing error: {0}")]
    Hash(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// A body that cannot be parsed into the expected shape (missing field,
/// wrong type, invalid JSON) fails validation like any other bad input;
/// the framework's own rejection response never reaches the client.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "request body rejected");
        AppError::Validation(vec!["Invalid request body".to_string()])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(messages) => {
                (StatusCode::BAD_REQUEST, json!({ "error": messages }))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Invalid credentials" }),
            ),
            AppError::TokenMissing => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized: Token missing" }),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized: Invalid token" }),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            AppError::Config(_)
            | AppError::Db(_)
            | AppError::Hash(_)
            | AppError::Jwt(_)
            | AppError::Internal(_) => {
                tracing::error!(error = %self, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
