mod catalog;
mod ids;
mod pool;
mod session;
mod word;

pub use catalog::{Catalog, CatalogError};
pub use ids::WordIndex;
pub use pool::PoolMode;
pub use session::{SessionState, SessionStateDraft};
pub use word::{WordEntry, WordError};
