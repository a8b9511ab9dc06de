use serde::Deserialize;
use thiserror::Error;

use crate::model::ids::WordIndex;
use crate::model::word::{WordEntry, WordError};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("word list is not valid JSON: {0}")]
    Json(String),

    #[error("entry {position} is invalid: {source}")]
    InvalidEntry {
        position: usize,
        #[source]
        source: WordError,
    },
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Raw shape of one word-list entry on disk.
///
/// `en`/`tr` are the keys used by the original word files.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(alias = "en")]
    foreign: String,
    #[serde(alias = "tr")]
    native: String,
}

/// Ordered, immutable word list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: Vec<WordEntry>,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }

    /// Parse a JSON array of `{ "foreign": .., "native": .. }` objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed JSON and
    /// `CatalogError::InvalidEntry` for blank terms.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEntry> =
            serde_json::from_str(json).map_err(|err| CatalogError::Json(err.to_string()))?;

        let entries = raw
            .into_iter()
            .enumerate()
            .map(|(position, entry)| {
                WordEntry::new(entry.foreign, entry.native)
                    .map_err(|source| CatalogError::InvalidEntry { position, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: WordIndex) -> Option<&WordEntry> {
        self.entries.get(index.value())
    }

    /// Every valid index, in catalog order.
    pub fn indices(&self) -> impl Iterator<Item = WordIndex> + '_ {
        (0..self.entries.len()).map(WordIndex::new)
    }
}
