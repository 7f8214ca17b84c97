//! API credential lifecycle.
//!
//! A single opaque key is kept in the key-value store. Saving does not
//! validate; [`CredentialManager::configure`] is the validate-then-save flow.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::StorageResult;
use crate::provider::DiaryGenerator;
use crate::storage::KeyValueStore;

/// Storage key for the provider API key.
pub const CREDENTIAL_KEY: &str = "askdiary_deepseek_api_key";

/// Outcome of validating and saving a credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialOutcome {
    /// The key was blank; nothing was sent or stored.
    Empty,
    /// The provider accepted the key and it was stored.
    Saved,
    /// The provider rejected the key, or could not be reached; storage untouched.
    Rejected,
}

/// Owns the stored API credential.
#[derive(Clone)]
pub struct CredentialManager {
    store: Arc<dyn KeyValueStore>,
}

impl CredentialManager {
    /// Create a manager over an injected key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Store the trimmed key, replacing any previous one.
    pub async fn save(&self, key: &str) -> StorageResult<()> {
        self.store.set(CREDENTIAL_KEY, key.trim()).await?;
        info!("API key saved");
        Ok(())
    }

    /// The stored key, if any. Read failures and blank values count as absent.
    pub async fn get(&self) -> Option<String> {
        match self.store.get(CREDENTIAL_KEY).await {
            Ok(value) => value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            Err(e) => {
                warn!(error = %e, "Failed to read API key; treating as absent");
                None
            }
        }
    }

    /// Delete the stored key. Removing an absent key succeeds.
    pub async fn remove(&self) -> StorageResult<()> {
        self.store.remove(CREDENTIAL_KEY).await?;
        info!("API key removed");
        Ok(())
    }

    /// Whether [`CredentialManager::get`] would return a key.
    pub async fn exists(&self) -> bool {
        self.get().await.is_some()
    }

    /// Stored key with most characters hidden, for display.
    pub async fn masked(&self) -> Option<String> {
        self.get().await.map(|k| mask(&k))
    }

    /// Validate `key` against the provider and store it only if accepted.
    pub async fn configure(
        &self,
        key: &str,
        validator: &dyn DiaryGenerator,
    ) -> StorageResult<CredentialOutcome> {
        let key = key.trim();
        if key.is_empty() {
            return Ok(CredentialOutcome::Empty);
        }

        if !validator.validate_credential(key).await {
            warn!("API key failed validation; not saved");
            return Ok(CredentialOutcome::Rejected);
        }

        self.save(key).await?;
        Ok(CredentialOutcome::Saved)
    }
}

/// Keep the first 3 and last 4 characters of a key.
pub fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 7), tail)
}
