//! Admin credential set backed by the file store.
//!
//! The set is one JSON document holding the list of valid admin passwords,
//! seeded with a single default on first run. Removal refuses to empty the
//! set so the admins can never lock themselves out entirely.

use anyhow::Result;
use thiserror::Error;

use crate::store::FileStore;

pub const SEED_PASSWORD: &str = "print-admin";

const PASSWORDS_DOC: &str = "passwords";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Cannot remove the last remaining password")]
    LastCredential,
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

#[derive(Clone, Debug)]
pub struct CredentialStore {
    store: FileStore,
}

impl CredentialStore {
    #[must_use]
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Current password list, seed default when the document is missing.
    pub async fn passwords(&self) -> Vec<String> {
        self.store
            .load(PASSWORDS_DOC, vec![SEED_PASSWORD.to_string()])
            .await
    }

    pub async fn contains(&self, password: &str) -> bool {
        self.passwords().await.iter().any(|p| p == password)
    }

    /// Append a password. Duplicates are suppressed without touching disk.
    /// # Errors
    /// [`CredentialError::EmptyPassword`] when `password` is empty, or a
    /// store error if persisting fails.
    pub async fn add(&self, password: &str) -> Result<Vec<String>, CredentialError> {
        if password.is_empty() {
            return Err(CredentialError::EmptyPassword);
        }

        let mut passwords = self.passwords().await;
        if !passwords.iter().any(|p| p == password) {
            passwords.push(password.to_string());
            self.store.save(PASSWORDS_DOC, &passwords).await?;
        }
        Ok(passwords)
    }

    /// Remove a password. Removing a password that is not present is a
    /// no-op; nothing is written in that case.
    /// # Errors
    /// [`CredentialError::LastCredential`] when `password` is the sole
    /// remaining entry, or a store error if persisting fails.
    pub async fn remove(&self, password: &str) -> Result<Vec<String>, CredentialError> {
        let mut passwords = self.passwords().await;

        if passwords.len() == 1 && passwords[0] == password {
            return Err(CredentialError::LastCredential);
        }

        let before = passwords.len();
        passwords.retain(|p| p != password);
        if passwords.len() != before {
            self.store.save(PASSWORDS_DOC, &passwords).await?;
        }
        Ok(passwords)
    }
}
