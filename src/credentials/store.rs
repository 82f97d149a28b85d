//! In-memory credential store.
//!
//! The store is created once at startup and shared through an `Arc`. Records
//! live in a `BTreeMap` keyed by username, so scans (`find_by_email`) walk
//! usernames in sorted order. Hashing runs on the blocking pool; the map lock
//! is never held across a hash.

use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{
    hasher::PasswordHasher,
    models::{AccountType, StoreError, UserRecord},
};

#[derive(Debug)]
pub struct CredentialStore {
    users: RwLock<BTreeMap<String, UserRecord>>,
    hasher: Arc<PasswordHasher>,
}

impl CredentialStore {
    #[must_use]
    pub fn new(hasher: PasswordHasher) -> Self {
        Self {
            users: RwLock::new(BTreeMap::new()),
            hasher: Arc::new(hasher),
        }
    }

    /// Exact, case-sensitive lookup on the primary key.
    pub async fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        self.users.read().await.get(username).cloned()
    }

    /// First record (in username order) whose email matches exactly.
    ///
    /// Emails are not unique, so several records may match.
    pub async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.users
            .read()
            .await
            .values()
            .find(|record| record.email == email)
            .cloned()
    }

    /// Insert `record` under `username` unless the key is already taken.
    ///
    /// # Errors
    /// Returns [`StoreError::UsernameTaken`] if the username exists; the stored
    /// record is left untouched.
    pub async fn insert(&self, username: &str, record: UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(username) {
            return Err(StoreError::UsernameTaken);
        }
        users.insert(username.to_string(), record);
        Ok(())
    }

    /// Hash `password` with a fresh salt and insert the new record.
    ///
    /// # Errors
    /// Returns [`StoreError::UsernameTaken`] if the username is in use and
    /// [`StoreError::Hash`] if hashing fails.
    #[instrument(skip(self, email, password))]
    pub async fn register(
        &self,
        username: &str,
        email: String,
        account_type: AccountType,
        password: String,
    ) -> Result<(), StoreError> {
        let hasher = Arc::clone(&self.hasher);
        let (salt, password_hash) = tokio::task::spawn_blocking(move || {
            let salt = PasswordHasher::generate_salt();
            hasher.hash(&password, &salt).map(|digest| (salt, digest))
        })
        .await
        .map_err(|err| StoreError::Hash(format!("hash task failed: {err}")))??;

        self.insert(
            username,
            UserRecord {
                email,
                account_type,
                salt,
                password_hash,
            },
        )
        .await?;

        debug!("user registered");

        Ok(())
    }

    /// Check `password` against the stored record for `username`.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`StoreError::InvalidCredentials`], after the same amount of hashing.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidCredentials`] on mismatch and
    /// [`StoreError::Hash`] if hashing fails.
    #[instrument(skip(self, password))]
    pub async fn verify(&self, username: &str, password: String) -> Result<UserRecord, StoreError> {
        let record = self.find_by_username(username).await;
        let hasher = Arc::clone(&self.hasher);

        tokio::task::spawn_blocking(move || -> Result<UserRecord, StoreError> {
            match record {
                Some(record) => {
                    if hasher.verify(&password, &record.salt, &record.password_hash)? {
                        Ok(record)
                    } else {
                        debug!("password mismatch");
                        Err(StoreError::InvalidCredentials)
                    }
                }
                None => {
                    hasher.hash_dummy(&password);
                    debug!("unknown username");
                    Err(StoreError::InvalidCredentials)
                }
            }
        })
        .await
        .map_err(|err| StoreError::Hash(format!("hash task failed: {err}")))?
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
