//! Account persistence for the cats service.
//!
//! The registration flow talks to storage only through [`AccountStore`], a
//! two-operation repository. Both shipped backends enforce email uniqueness
//! inside `create`, so a registration that loses a race against another one
//! for the same email gets [`StoreError::Conflict`] rather than a duplicate.

mod error;
mod file;
mod memory;
mod types;

pub use error::StoreError;
pub use file::FileAccountStore;
pub use memory::{AccountCollection, MemoryAccountStore};
pub use types::*;

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{info, warn};

/// Repository for account records.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Whether an account with this email already exists.
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// Persist a new account, assigning its id and creation time.
    ///
    /// Fails with [`StoreError::Conflict`] if the email is already taken.
    async fn create(&self, record: NewAccount) -> Result<Account, StoreError>;
}

/// Storage backend selected at startup.
#[derive(Debug)]
pub enum Store {
    /// JSON file persistence
    File(FileAccountStore),
    /// In-memory only (no persistence)
    Memory(MemoryAccountStore),
}

impl Store {
    /// Open a file-backed store at `path`.
    pub async fn file(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = FileAccountStore::open(path).await?;
        info!("Using file account storage at {:?}", store.path());
        Ok(Store::File(store))
    }

    /// Create an in-memory store.
    pub fn memory() -> Self {
        warn!("Using in-memory account storage (data will be lost on restart)");
        Store::Memory(MemoryAccountStore::new())
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        match self {
            Store::File(s) => s.count().await,
            Store::Memory(s) => s.count().await,
        }
    }
}

#[async_trait]
impl AccountStore for Store {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        match self {
            Store::File(s) => s.exists_by_email(email).await,
            Store::Memory(s) => s.exists_by_email(email).await,
        }
    }

    async fn create(&self, record: NewAccount) -> Result<Account, StoreError> {
        match self {
            Store::File(s) => s.create(record).await,
            Store::Memory(s) => s.create(record).await,
        }
    }
}
