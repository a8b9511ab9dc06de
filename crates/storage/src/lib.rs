#![forbid(unsafe_code)]

pub mod progress;
pub mod record;
pub mod repository;
pub mod sqlite;

pub use progress::{PROGRESS_KEY, ProgressStore};
pub use record::ProgressRecord;
pub use repository::{InMemoryStore, KeyValueStore, Storage, StorageError};
