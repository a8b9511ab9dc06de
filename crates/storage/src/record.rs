use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use vocab_core::model::{PoolMode, SessionState, SessionStateDraft, WordIndex};

use crate::repository::StorageError;

/// Persisted shape of the quiz progress.
///
/// This mirrors the domain `SessionState` so adapters can serialize it
/// without leaking storage concerns into the domain layer. Sets are stored as
/// plain arrays; uniqueness is restored when the record is turned back into a
/// `SessionState`.
///
/// `remainingQueue`, `difficultSet` and `wrongSet` must be present and be
/// arrays, otherwise the record is treated as corrupt. Their non-index
/// elements are skipped. Every other field falls back to its default when it
/// is missing or has the wrong type. The legacy browser keys (`poolType`,
/// `remaining`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    #[serde(default, alias = "poolType", deserialize_with = "lenient")]
    pub pool_mode: PoolMode,
    #[serde(alias = "remaining", deserialize_with = "index_array")]
    pub remaining_queue: Vec<WordIndex>,
    #[serde(default, alias = "answered", deserialize_with = "lenient_index_array")]
    pub ever_asked_set: Vec<WordIndex>,
    #[serde(alias = "difficult", deserialize_with = "index_array")]
    pub difficult_set: Vec<WordIndex>,
    #[serde(alias = "wrong", deserialize_with = "index_array")]
    pub wrong_set: Vec<WordIndex>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_asked: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub total_correct: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub total_wrong: u32,
    #[serde(default, deserialize_with = "lenient")]
    pub current_index: Option<WordIndex>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

fn index_array<'de, D>(deserializer: D) -> Result<Vec<WordIndex>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(indices(items))
}

fn lenient_index_array<'de, D>(deserializer: D) -> Result<Vec<WordIndex>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(indices(items)),
        _ => Ok(Vec::new()),
    }
}

fn indices(items: Vec<Value>) -> Vec<WordIndex> {
    items
        .iter()
        .filter_map(Value::as_u64)
        .filter_map(|n| usize::try_from(n).ok())
        .map(WordIndex::new)
        .collect()
}

impl ProgressRecord {
    #[must_use]
    pub fn from_state(state: &SessionState) -> Self {
        let draft = state.to_draft();
        Self {
            pool_mode: draft.pool_mode,
            remaining_queue: draft.remaining,
            ever_asked_set: draft.ever_asked,
            difficult_set: draft.difficult,
            wrong_set: draft.wrong,
            total_asked: draft.total_asked,
            total_correct: draft.total_correct,
            total_wrong: draft.total_wrong,
            current_index: draft.current,
        }
    }

    /// Convert the record back into a domain `SessionState`.
    #[must_use]
    pub fn into_state(self, catalog_len: usize) -> SessionState {
        SessionState::from_persisted(
            SessionStateDraft {
                pool_mode: self.pool_mode,
                remaining: self.remaining_queue,
                ever_asked: self.ever_asked_set,
                difficult: self.difficult_set,
                wrong: self.wrong_set,
                total_asked: self.total_asked,
                total_correct: self.total_correct,
                total_wrong: self.total_wrong,
                current: self.current_index,
            },
            catalog_len,
        )
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String, StorageError> {
        serde_json::to_string(self).map_err(|err| StorageError::Serialization(err.to_string()))
    }

    /// Decode and shape-check a stored record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON or when a
    /// required array is missing or not an array.
    pub fn from_json(json: &str) -> Result<Self, StorageError> {
        serde_json::from_str(json).map_err(|err| StorageError::Serialization(err.to_string()))
    }
}
