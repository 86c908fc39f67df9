//! Password hashing
//!
//! Uses Argon2id with a random salt per hash.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

use crate::error::AppError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Hash a password using Argon2id
///
/// # Errors
/// Returns an error if hashing fails
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {e}")))
}

/// Password hasher handed to services
#[derive(Debug, Clone, Default)]
pub struct PasswordService;

impl PasswordService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Hash a new account password after checking its length
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
            )));
        }
        hash_password(password)
    }
}
