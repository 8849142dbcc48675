//! In-memory account storage.

use crate::error::StoreError;
use crate::types::{Account, NewAccount};
use crate::AccountStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Account records indexed by email.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountCollection {
    records: HashMap<String, Account>,
}

impl AccountCollection {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Get an account by email.
    pub fn get(&self, email: &str) -> Option<&Account> {
        self.records.get(email)
    }

    /// Check whether an email is already taken.
    pub fn contains_email(&self, email: &str) -> bool {
        self.records.contains_key(email)
    }

    /// Insert a new account, refusing to overwrite an existing email.
    pub fn insert(&mut self, account: Account) -> Result<(), StoreError> {
        if self.contains_email(&account.email) {
            return Err(StoreError::Conflict(account.email));
        }
        self.records.insert(account.email.clone(), account);
        Ok(())
    }

    /// Number of stored accounts.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Account store backed by process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<AccountCollection>,
}

impl MemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.count()
    }

    /// Snapshot of the account stored under `email`, if any.
    pub async fn get(&self, email: &str) -> Option<Account> {
        self.accounts.read().await.get(email).cloned()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.read().await.contains_email(email))
    }

    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn create(&self, record: NewAccount) -> Result<Account, StoreError> {
        let account = Account::from_new(record);

        // Uniqueness check and insert happen under the same write lock.
        let mut accounts = self.accounts.write().await;
        accounts.insert(account.clone())?;

        debug!(account_id = %account.id, total = accounts.count(), "Account stored in memory");
        Ok(account)
    }
}
