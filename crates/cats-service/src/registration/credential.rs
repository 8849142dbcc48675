//! Password hashing for stored credentials.

use crate::error::ServiceError;
use secrecy::{ExposeSecret, SecretString};

/// Work factor used when none is configured.
pub const DEFAULT_COST: u32 = 10;

/// Lowest cost bcrypt accepts.
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_COST: u32 = 31;

/// Hash a password with bcrypt at `cost`, using a fresh random salt.
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServiceError> {
    Ok(bcrypt::hash(password, cost)?)
}

/// Verify a password against a stored bcrypt hash.
///
/// Returns `Ok(false)` on mismatch; a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    Ok(bcrypt::verify(password, hash)?)
}

/// Hash on the blocking thread pool so the async runtime is not stalled by
/// the key-stretching work.
pub async fn hash_password_blocking(
    password: SecretString,
    cost: u32,
) -> Result<String, ServiceError> {
    tokio::task::spawn_blocking(move || hash_password(password.expose_secret(), cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("Hashing task failed: {}", e)))?
}
