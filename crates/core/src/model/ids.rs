use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a word inside the catalog.
///
/// Indices are stable for the lifetime of the process and are what the
/// persisted progress record stores.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordIndex(usize);

impl WordIndex {
    /// Creates a new `WordIndex`
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the underlying position
    #[must_use]
    pub const fn value(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WordIndex({})", self.0)
    }
}

impl fmt::Display for WordIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for WordIndex {
    fn from(value: usize) -> Self {
        Self(value)
    }
}
