//! Shared error types for the services crate.

use thiserror::Error;

use storage::StorageError;

/// Errors emitted by the quiz state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("no difficult or wrong words yet")]
    NoCandidates,
    #[error("word list has {len} entries; at least 4 are needed to build answer options")]
    CatalogTooSmall { len: usize },
}

/// Errors emitted by `QuizLoopService` maintenance operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoopError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
