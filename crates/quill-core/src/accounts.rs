use std::sync::Arc;

use anyhow::anyhow;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use tracing::debug;

use quill_types::models::Account;

use crate::error::ServiceError;
use crate::ports::{AccountDirectory, AccountStore};

/// Owns the account lifecycle rules: registration validation, login
/// authentication, lookup by id. Accounts are immutable once registered.
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Registers a new account. Checks, in order: username non-blank,
    /// password at least 4 characters, username not already taken. The
    /// password is stored as an Argon2id hash; the returned account carries
    /// the generated id and the credentials exactly as submitted.
    pub fn register(&self, candidate: Account) -> Result<Account, ServiceError> {
        if candidate.username.trim().is_empty() {
            return Err(ServiceError::InvalidInput("username must not be blank"));
        }
        if candidate.password.chars().count() < 4 {
            return Err(ServiceError::InvalidInput(
                "password must be at least 4 characters",
            ));
        }
        if self
            .store
            .find_account_by_username(&candidate.username)?
            .is_some()
        {
            return Err(ServiceError::Conflict("username already registered"));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(candidate.password.as_bytes(), &salt)
            .map_err(|e| anyhow!("password hashing failed: {e}"))?
            .to_string();

        let id = self
            .store
            .insert_account(&candidate.username, &password_hash)?;
        debug!(id, username = %candidate.username, "account registered");

        Ok(Account {
            id: Some(id),
            ..candidate
        })
    }

    /// Authenticates a username/password pair. Blank credentials, an unknown
    /// username, and a wrong password are indistinguishable to the caller.
    pub fn login(&self, credentials: Account) -> Result<Account, ServiceError> {
        if credentials.username.trim().is_empty() || credentials.password.is_empty() {
            return Err(ServiceError::Unauthorized);
        }

        let stored = self
            .store
            .find_account_by_username(&credentials.username)?
            .ok_or(ServiceError::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&stored.password)
            .map_err(|e| anyhow!("stored credential unreadable: {e}"))?;
        Argon2::default()
            .verify_password(credentials.password.as_bytes(), &parsed_hash)
            .map_err(|_| ServiceError::Unauthorized)?;

        // Echo the submitted password rather than the stored hash so the
        // response shape matches what the client sent in.
        Ok(Account {
            id: stored.id,
            username: stored.username,
            password: credentials.password,
        })
    }

    /// Pure lookup. Absence is a valid result, not a failure.
    pub fn find_by_id(&self, id: i64) -> Result<Option<Account>, ServiceError> {
        Ok(self.store.find_account_by_id(id)?)
    }
}

impl AccountDirectory for AccountService {
    fn find_by_id(&self, id: i64) -> Result<Option<Account>, ServiceError> {
        AccountService::find_by_id(self, id)
    }
}
