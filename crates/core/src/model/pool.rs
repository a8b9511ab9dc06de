use serde::{Deserialize, Serialize};
use std::fmt;

/// Which subset of the catalog questions are drawn from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolMode {
    /// Every word in the catalog.
    #[default]
    #[serde(rename = "all")]
    Full,
    /// Words flagged difficult plus words answered wrong at least once.
    #[serde(rename = "hardWrong")]
    DifficultAndWrong,
}

impl PoolMode {
    /// Stable string used in the persisted record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Full => "all",
            Self::DifficultAndWrong => "hardWrong",
        }
    }
}

impl fmt::Display for PoolMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
