use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use rand::RngCore;

use crate::error::{AppError, AppResult};

/// Length of passwords handed out to new hires.
pub const GENERATED_PASSWORD_LEN: usize = 7;

pub fn hash_password(password: &str) -> AppResult<String> {
    let argon2 = Argon2::default();
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))
}

/// `Ok(false)` on mismatch, `Err` only when the stored hash is unreadable.
pub fn verify_password(password: &str, hashed: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hashed)
        .map_err(|e| AppError::Internal(format!("invalid stored password hash: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!("password verification failed: {e}"))),
    }
}

/// Seven characters of base64 over seven bytes from the OS RNG.
pub fn generate_password() -> String {
    let mut bytes = [0u8; GENERATED_PASSWORD_LEN];
    rand::rngs::OsRng.fill_bytes(&mut bytes);

    let mut encoded = STANDARD.encode(bytes);
    encoded.truncate(GENERATED_PASSWORD_LEN);
    encoded
}
