//! Account store errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store already holds an account with this email.
    #[error("Account already exists: {0}")]
    Conflict(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
