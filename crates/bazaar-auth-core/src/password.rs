//! Password hashing (Argon2, PHC string format)

use std::sync::OnceLock;

use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use password_hash::{PasswordHash, SaltString};

/// Minimum length of a newly chosen password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors raised while hashing
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("password must be at least {} characters", MIN_PASSWORD_LENGTH)]
    TooShort,

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

/// Hash a password with a fresh random salt
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let mut salt_bytes = [0u8; 16];
    getrandom::getrandom(&mut salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;
    let salt =
        SaltString::encode_b64(&salt_bytes).map_err(|e| PasswordError::Hashing(e.to_string()))?;
    let phc = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::Hashing(e.to_string()))?
        .to_string();
    Ok(phc)
}

/// Check a raw password against a stored PHC hash.
///
/// Unparseable hashes never verify.
pub fn verify_password(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Stand-in hash checked when no account matches a login identifier
static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

/// Run one Argon2 verification against a throwaway hash.
///
/// Keeps an unknown-account login as slow as a wrong-password one. Always
/// returns `false`.
pub fn verify_dummy_password(password: &str) -> bool {
    let hash = DUMMY_HASH.get_or_init(|| hash_password("bazaar-no-such-account").ok());
    if let Some(hash) = hash {
        let _ = verify_password(hash, password);
    }
    false
}

/// Length policy for new passwords
pub fn validate_new_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}
