//! Account registration.
//!
//! Signup is a short sequential script: check the email is free, hash the
//! password, create the record, hand back the public view. The pre-check is
//! only a fast path. Two concurrent signups for the same email can both pass
//! it, and the store's own uniqueness check inside `create` decides which one
//! wins; the loser sees [`ServiceError::DuplicateAccount`] either way.

pub mod credential;

use crate::error::ServiceError;
use account_store::{AccountPublicView, AccountStore, NewAccount};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// A signup request. The password is only held long enough to hash it.
#[derive(Debug)]
pub struct AccountRegistrationRequest {
    pub email: String,
    pub display_name: String,
    pub raw_password: SecretString,
}

impl AccountRegistrationRequest {
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
        raw_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            display_name: display_name.into(),
            raw_password: SecretString::new(raw_password.into()),
        }
    }

    /// Check that every required field is present.
    pub fn validate(&self) -> Result<(), ServiceError> {
        let mut missing = Vec::new();
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.display_name.trim().is_empty() {
            missing.push("name");
        }
        if self.raw_password.expose_secret().is_empty() {
            missing.push("password");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Tunables for the registration flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationSettings {
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Deadline applied by HTTP callers through [`RegistrationService::register_within`]
    pub timeout: Duration,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            bcrypt_cost: credential::DEFAULT_COST,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Registers new accounts against an [`AccountStore`].
#[derive(Clone)]
pub struct RegistrationService {
    store: Arc<dyn AccountStore>,
    settings: RegistrationSettings,
}

impl RegistrationService {
    pub fn new(store: Arc<dyn AccountStore>, settings: RegistrationSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> RegistrationSettings {
        self.settings
    }

    /// Register a new account.
    ///
    /// Performs one store read and at most one store write. Store failures are
    /// returned as [`ServiceError::StoreUnavailable`] and never retried, since
    /// a create that failed part-way could otherwise register twice.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(
        &self,
        request: AccountRegistrationRequest,
    ) -> Result<AccountPublicView, ServiceError> {
        request.validate()?;

        if self.store.exists_by_email(&request.email).await? {
            warn!("Signup rejected: email already registered");
            return Err(ServiceError::DuplicateAccount(request.email));
        }

        let credential_hash =
            credential::hash_password_blocking(request.raw_password, self.settings.bcrypt_cost)
                .await?;

        let account = self
            .store
            .create(NewAccount {
                email: request.email,
                display_name: request.display_name,
                credential_hash,
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Account creation failed");
                ServiceError::from(e)
            })?;

        info!(account_id = %account.id, "Account registered");
        Ok(account.public_view())
    }

    /// Register a new account, giving up after `timeout`.
    ///
    /// On timeout the in-flight flow is dropped; if the store had already
    /// committed the record, a retry will report a duplicate.
    pub async fn register_within(
        &self,
        request: AccountRegistrationRequest,
        timeout: Duration,
    ) -> Result<AccountPublicView, ServiceError> {
        match tokio::time::timeout(timeout, self.register(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(?timeout, "Registration timed out");
                Err(ServiceError::TimedOut(timeout))
            }
        }
    }
}
