//! Best-effort key-value persistence
//!
//! A narrow `get`/`set` seam over small JSON-serializable values (favorite
//! IDs, UI layout preferences). No transactional guarantees: callers treat
//! corrupted or missing data as absent and carry on.

use serde_json::Value;

use crate::error::AppResult;

pub mod json_file;
pub mod memory;

pub use json_file::FileStore;
pub use memory::MemoryStore;

/// Trait for key-value stores
///
/// Synchronous from the caller's point of view; the runtime model is
/// single-user, so there is no locking discipline across processes.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> AppResult<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> AppResult<()>;
}
