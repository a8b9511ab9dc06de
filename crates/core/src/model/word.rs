use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordError {
    #[error("foreign term cannot be empty")]
    EmptyForeign,

    #[error("native translation cannot be empty")]
    EmptyNative,
}

/// One term pair from the word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    foreign: String,
    native: String,
}

impl WordEntry {
    /// Creates a validated term pair. Both sides are trimmed.
    ///
    /// # Errors
    ///
    /// Returns `WordError::EmptyForeign` or `WordError::EmptyNative` when a side
    /// is blank after trimming.
    pub fn new(foreign: impl Into<String>, native: impl Into<String>) -> Result<Self, WordError> {
        let foreign = foreign.into().trim().to_owned();
        let native = native.into().trim().to_owned();

        if foreign.is_empty() {
            return Err(WordError::EmptyForeign);
        }
        if native.is_empty() {
            return Err(WordError::EmptyNative);
        }

        Ok(Self { foreign, native })
    }

    /// The term shown as the question.
    #[must_use]
    pub fn foreign(&self) -> &str {
        &self.foreign
    }

    /// The translation used as the correct answer label.
    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }
}
