//! Key-value backends and the durable value built on top of them.
//!
//! DESIGN
//! ======
//! `KeyValueStore` is the injectable storage capability: string keys mapped
//! to string documents. `Durable<T>` owns the JSON encoding and the
//! recovery rules, so backends stay dumb. `MemoryStore` backs tests and
//! simulates a size quota; `FileStore` persists one document per key under
//! a data directory.

pub mod durable;
pub mod file;
pub mod memory;

pub use durable::{Durable, LoadOutcome, PersistOutcome};
pub use file::FileStore;
pub use memory::MemoryStore;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by key-value backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not read or write the underlying medium.
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Writing the value would exceed the backend's size limit.
    #[error("storage quota exceeded for key {key}: {needed} bytes needed, limit {limit}")]
    QuotaExceeded { key: String, needed: usize, limit: usize },

    /// The value could not be serialized before writing.
    #[error("value for key {key} could not be encoded: {reason}")]
    Encode { key: String, reason: String },
}

// =============================================================================
// KEY-VALUE STORE TRAIT
// =============================================================================

/// Durable string-to-string storage. Implementations must be safe to share
/// between the caller and the background writer task.
pub trait KeyValueStore: Send + Sync {
    /// Read the document stored under `key`, or `None` if nothing was written.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the document stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write is rejected or fails.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the backend cannot delete the entry.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}
