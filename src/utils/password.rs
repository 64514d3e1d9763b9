//! One-way password hashing.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use crate::error::AppError;

/// Hashes `password` with Argon2id and a fresh random salt.
///
/// Returns the PHC string (`$argon2id$v=19$...`), which embeds the salt and
/// parameters. This is CPU-bound; async callers should run it on the blocking
/// pool (see [`hash_password_blocking`]).
///
/// # Errors
///
/// Returns [`AppError::Upstream`] if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;

    Ok(hash.to_string())
}

/// Runs [`hash_password`] on tokio's blocking thread pool.
///
/// # Errors
///
/// Returns [`AppError::Upstream`] if hashing fails or the task panics.
pub async fn hash_password_blocking(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password)).await?
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_is_phc_and_verifies() {
        let hash = hash_password("pw").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"pw", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"other", &parsed).is_err());
    }

    #[test]
    fn test_same_password_gets_different_salts() {
        let a = hash_password("pw").unwrap();
        let b = hash_password("pw").unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_blocking_variant() {
        let hash = hash_password_blocking("secret".to_string()).await.unwrap();
        assert!(!hash.contains("secret"));
    }
}
