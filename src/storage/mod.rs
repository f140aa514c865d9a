//! Key-value storage port.
//!
//! The tool store only ever needs `get/set/remove` over string keys and
//! string values. Backends:
//!   - [`MemoryStore`]: process-local map, used by tests and ephemeral sessions
//!   - [`FileStore`]: one `<key>.json` file per key, replaced atomically

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::types::{Config, Result, StorageBackend};
use std::sync::Arc;

/// Durable, process-wide key-value persistence.
///
/// Each call is synchronous and atomic with respect to other calls on the
/// same backend. Concurrent writers race with last-writer-wins semantics.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Build the backend selected by configuration.
pub fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => Ok(Arc::new(FileStore::open(&config.storage.path)?)),
    }
}
