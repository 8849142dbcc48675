//! JSON file-backed account storage.

use crate::error::StoreError;
use crate::memory::AccountCollection;
use crate::types::{Account, NewAccount};
use crate::AccountStore;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

/// Account store that keeps a full snapshot in memory and rewrites a JSON
/// file on every change.
#[derive(Debug)]
pub struct FileAccountStore {
    accounts: RwLock<AccountCollection>,
    storage_path: PathBuf,
}

impl FileAccountStore {
    /// Open the store at `storage_path`, loading existing accounts.
    ///
    /// A missing file yields an empty store; the file is created on the first
    /// write.
    pub async fn open(storage_path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let storage_path = storage_path.into();
        let accounts = load(&storage_path).await?;

        Ok(Self {
            accounts: RwLock::new(accounts),
            storage_path,
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Number of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.count()
    }

    /// Write `accounts` to disk atomically (temp file + rename).
    async fn save(&self, accounts: &AccountCollection) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(accounts)?;

        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let temp_path = self.storage_path.with_extension("tmp");
        fs::write(&temp_path, &data).await?;
        fs::rename(&temp_path, &self.storage_path).await?;

        debug!(
            "Saved {} accounts ({} bytes) to {:?}",
            accounts.count(),
            data.len(),
            self.storage_path
        );
        Ok(())
    }
}

async fn load(storage_path: &Path) -> Result<AccountCollection, StoreError> {
    let data = match fs::read(storage_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(
                "Account file not found at {:?}, starting with empty store",
                storage_path
            );
            return Ok(AccountCollection::new());
        }
        Err(e) => return Err(e.into()),
    };
    if data.is_empty() {
        warn!("Account file {:?} is empty, starting with empty store", storage_path);
        return Ok(AccountCollection::new());
    }

    let accounts: AccountCollection = serde_json::from_slice(&data)?;
    info!(
        "Loaded {} accounts from {:?}",
        accounts.count(),
        storage_path
    );
    Ok(accounts)
}

#[async_trait]
impl AccountStore for FileAccountStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.read().await.contains_email(email))
    }

    #[instrument(skip(self, record), fields(email = %record.email))]
    async fn create(&self, record: NewAccount) -> Result<Account, StoreError> {
        let account = Account::from_new(record);

        let mut accounts = self.accounts.write().await;

        // Persist the next snapshot before committing it, so a failed write
        // leaves both memory and disk without the record.
        let mut next = accounts.clone();
        next.insert(account.clone())?;
        self.save(&next).await?;
        *accounts = next;

        Ok(account)
    }
}
