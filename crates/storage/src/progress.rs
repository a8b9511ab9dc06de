use std::sync::Arc;

use crate::record::ProgressRecord;
use crate::repository::{KeyValueStore, StorageError};

/// Fixed key the progress record lives under.
pub const PROGRESS_KEY: &str = "vocab_quiz_state_v1";

/// Typed access to the single progress record in a key-value backend.
#[derive(Clone)]
pub struct ProgressStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProgressStore {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        PROGRESS_KEY
    }

    /// Load the stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` when the stored value fails shape
    /// validation, or a backend error when it cannot be read.
    pub async fn load(&self) -> Result<Option<ProgressRecord>, StorageError> {
        match self.kv.get(PROGRESS_KEY).await? {
            Some(raw) => ProgressRecord::from_json(&raw).map(Some),
            None => Ok(None),
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the backend write fails.
    pub async fn save(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let json = record.to_json()?;
        self.kv.put(PROGRESS_KEY, &json).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.kv.remove(PROGRESS_KEY).await
    }
}
