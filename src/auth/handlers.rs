//! Auth HTTP handlers: register, login.

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::{hash_password, validate_login, validate_register, verify_password};
use crate::db::{user_create, user_find_by_email};
use crate::error::AppError;
use crate::handlers::http::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserInfo,
}

/// Sanitized projection of a user record; the password hash never
/// appears in any response.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(body) = body?;
    let violations = validate_register(&body.username, &body.email, &body.password);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    // Best-effort early check; the unique constraint on insert remains the
    // authoritative guard against concurrent registrations.
    if user_find_by_email(state.db(), &body.email).await?.is_some() {
        debug!(email = %body.email, "registration rejected: email taken");
        return Err(AppError::Conflict("Email already in use".to_string()));
    }

    let password_hash = hash_password(&body.password)?;
    let user = user_create(state.db(), &body.username, &body.email, &password_hash).await?;
    info!(user_id = user.id, username = %user.username, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserInfo {
                id: user.id,
                email: user.email,
                username: user.username,
            },
        }),
    ))
}

/// POST /auth/login
///
/// Unknown email and wrong password take different branches but produce
/// the identical 401 body, so responses cannot be used to enumerate
/// accounts.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(body) = body?;
    let violations = validate_login(&body.email, &body.password);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let user = match user_find_by_email(state.db(), &body.email).await? {
        Some(user) => user,
        None => {
            debug!("login failed: unknown email");
            return Err(AppError::InvalidCredentials);
        }
    };

    if !verify_password(&body.password, &user.password_hash)? {
        debug!(user_id = user.id, "login failed: password mismatch");
        return Err(AppError::InvalidCredentials);
    }

    let token = state.jwt_secret().issue(user.id, &user.email)?;
    info!(user_id = user.id, "login successful");

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
    }))
}
