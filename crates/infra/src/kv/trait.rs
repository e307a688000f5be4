use std::sync::Arc;

use thiserror::Error;

/// Storage operation error.
///
/// These are **infrastructure errors** as opposed to domain errors. The
/// stores built on top log them and carry on with their in-memory state.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    /// The write would push the store past its size limit.
    #[error("storage quota exceeded writing '{key}' (limit {limit} bytes)")]
    QuotaExceeded { key: String, limit: usize },

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage lock poisoned")]
    Poisoned,

    /// The key cannot be stored by this backend.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),
}

/// String-keyed durable map holding JSON text.
pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key was never written (or was removed).
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value at `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`; removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S> KeyValueStore for Arc<S>
where
    S: KeyValueStore + ?Sized,
{
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
