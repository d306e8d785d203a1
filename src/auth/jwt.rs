//! JWT issue and verification.

use crate::error::{AppError, AppResult};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Identity claims carried by a token. Rebuilt on every verification,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies bearer tokens against the process-wide secret.
/// Tokens expire exactly one hour after issuance.
#[derive(Clone)]
pub struct JwtSecret {
    secret: String,
}

impl JwtSecret {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn issue(&self, user_id: i64, email: &str) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Jwt(e.to_string()))
    }

    /// Verify signature and expiry. Signature mismatch, malformed structure,
    /// and passed expiry all collapse to the same error; callers cannot and
    /// must not distinguish them.
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::default();
        // jsonwebtoken defaults to 60s of leeway; expiry here is exact.
        validation.leeway = 0;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!(error = %e, "token verification failed");
            AppError::InvalidToken
        })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> JwtSecret {
        JwtSecret::new("test-jwt-secret-min-32-chars!!".to_string())
    }

    #[test]
    fn issue_then_verify_returns_same_claims() {
        let jwt = secret();
        let token = jwt.issue(42, "a@x.com").unwrap();
        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "a@x.com");
    }

    #[test]
    fn expiry_is_one_hour_after_issuance() {
        let jwt = secret();
        let token = jwt.issue(1, "a@x.com").unwrap();
        let claims = jwt.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_fails_even_with_valid_signature() {
        let jwt = secret();
        let now = Utc::now();
        let claims = Claims {
            sub: 1,
            email: "a@x.com".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-jwt-secret-min-32-chars!!"),
        )
        .unwrap();

        assert!(matches!(jwt.verify(&token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn tampered_signature_fails() {
        let jwt = secret();
        let token = jwt.issue(7, "a@x.com").unwrap();

        // Altering the first signature character always changes the first
        // decoded signature byte.
        let (head, sig) = token.rsplit_once('.').unwrap();
        let mut sig: Vec<char> = sig.chars().collect();
        sig[0] = if sig[0] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", head, sig.into_iter().collect::<String>());

        assert!(matches!(jwt.verify(&tampered), Err(AppError::InvalidToken)));

        let truncated = &token[..token.len() - 5];
        assert!(matches!(jwt.verify(truncated), Err(AppError::InvalidToken)));
    }

    #[test]
    fn malformed_token_fails() {
        let jwt = secret();
        assert!(matches!(
            jwt.verify("not-a-jwt"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(jwt.verify(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn wrong_secret_fails() {
        let a = JwtSecret::new("secret-aaaaaaaaaaaaaaaaaaaaaaaaa".to_string());
        let b = JwtSecret::new("secret-bbbbbbbbbbbbbbbbbbbbbbbbb".to_string());
        let token = a.issue(1, "a@x.com").unwrap();
        assert!(matches!(b.verify(&token), Err(AppError::InvalidToken)));
    }
}
