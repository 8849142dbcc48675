//! Account records and their public projection.

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes in an account id (rendered as 24 hex chars).
const ACCOUNT_ID_BYTES: usize = 12;

/// Fields supplied by the caller when creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub display_name: String,
    /// Salted one-way hash of the password. Never the raw password.
    pub credential_hash: String,
}

/// A persisted account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Store-assigned identifier
    pub id: String,

    /// Unique account identifier
    pub email: String,

    pub display_name: String,

    pub credential_hash: String,

    /// When the store created the record
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Build a stored account from caller fields, assigning id and timestamp.
    pub fn from_new(record: NewAccount) -> Self {
        Self {
            id: generate_account_id(),
            email: record.email,
            display_name: record.display_name,
            credential_hash: record.credential_hash,
            created_at: Utc::now(),
        }
    }

    /// Credential-free view of this account.
    pub fn public_view(&self) -> AccountPublicView {
        AccountPublicView {
            id: self.id.clone(),
            email: self.email.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Read-only projection of an [`Account`] that is safe to hand to callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountPublicView {
    pub id: String,
    pub email: String,
    #[serde(rename = "name")]
    pub display_name: String,
}

impl From<Account> for AccountPublicView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            display_name: account.display_name,
        }
    }
}

/// Generate a random 24-character hex account id.
pub fn generate_account_id() -> String {
    let mut bytes = [0u8; ACCOUNT_ID_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
