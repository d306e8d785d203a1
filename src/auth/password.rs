//! Password hashing and verification (argon2, salted).

use crate::error::{AppError, AppResult};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// One-way salted hash. Non-deterministic: each call salts anew. A hashing
/// failure is fatal for the request and surfaces as a server error.
pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Hash(e.to_string()))?
        .to_string();
    Ok(hash)
}

/// Returns `Ok(false)` for a mismatch; only a stored hash that cannot be
/// parsed at all is an error.
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| AppError::Hash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password("Str0ng!pw").unwrap();
        assert!(verify_password("Str0ng!pw", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("Str0ng!pw").unwrap();
        let b = hash_password("Str0ng!pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn unparseable_hash_is_an_error_not_a_mismatch() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
