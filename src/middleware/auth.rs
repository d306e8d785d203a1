//! Auth middleware: bearer-token extractor for protected routes.
//!
//! Verification is pure (`bearer_token` + `JwtSecret::verify`); the
//! response for a rejected request is produced by axum from the returned
//! `AppError`, so a request can never be answered twice.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;

use crate::error::AppError;
use crate::handlers::http::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated identity extracted from a verified bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

/// The token after the literal `Bearer ` scheme prefix, if the header is
/// present and well-formed. The scheme match is case-sensitive.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
}

#[axum::async_trait]
impl axum::extract::FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers).ok_or_else(|| {
            debug!("rejected request: missing or non-Bearer Authorization header");
            AppError::TokenMissing
        })?;
        let claims = state.jwt_secret().verify(token)?;
        Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_extracts_after_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer abc.def.ghi".parse().unwrap());
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Basic dXNlcjpwYXNz".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn scheme_is_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "bearer abc".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn bare_scheme_without_token_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer".parse().unwrap());
        assert_eq!(bearer_token(&headers), None);
    }
}
