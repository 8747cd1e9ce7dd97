//! Ordered key-value engine contract and the embedded in-memory engine.
//!
//! The comparison/indexing core consumes the engine only through these
//! traits: a comparator registered per index database, exact-match cursor
//! positioning with duplicate iteration, and primary-key gets. All calls
//! run inside a caller-supplied transaction; the core never begins or
//! commits one.
//!
//! # API
//!
//! - `KeyComparator` - byte-key ordering capability, registered at
//!   database-creation time
//! - `ReadTransaction` / `IndexCursor` - read-side lookup contract
//! - `WriteHandle` - key/value maintenance used by the index write path
//! - `MemoryEngine` - embedded implementation backing tests and the
//!   default in-process configuration

use std::cmp::Ordering;

pub mod errors;
mod memory;

pub use errors::{StorageError, StorageResult};
pub use memory::{MemoryEngine, MemoryTransaction};

/// Opaque handle naming one database inside the engine
pub type DbiHandle = u32;

/// Byte-key ordering capability.
///
/// Implementations must be pure and safe to call concurrently from any
/// number of reader threads: the engine invokes the comparator during
/// cursor operations under its own locking discipline, and the two input
/// slices are only valid for the duration of the call.
pub trait KeyComparator: Send + Sync {
    /// Orders two encoded keys
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering;
}

/// Exact-match cursor over one index database.
///
/// Cursors are scoped to the transaction that produced them.
pub trait IndexCursor {
    /// Positions at the exact key; returns the first associated value.
    ///
    /// No range semantics: a miss is `None`, never the nearest neighbor.
    fn seek_exact(&mut self, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;

    /// Advances to the next value stored under the current key.
    ///
    /// Only meaningful after a successful `seek_exact` on a database with
    /// duplicate support; `None` once duplicates are exhausted.
    fn next_duplicate(&mut self) -> StorageResult<Option<Vec<u8>>>;
}

/// Read-side view of the engine within one transaction
pub trait ReadTransaction {
    /// Opens a cursor over the given database
    fn cursor(&self, dbi: DbiHandle) -> StorageResult<Box<dyn IndexCursor + '_>>;

    /// Point lookup by key, no cursor state
    fn get(&self, dbi: DbiHandle, key: &[u8]) -> StorageResult<Option<Vec<u8>>>;
}

/// Write-side maintenance contract used when applying documents to indexes
pub trait WriteHandle {
    /// Stores key -> value; duplicate-supporting databases accumulate
    /// values under one key, others overwrite
    fn put(&mut self, dbi: DbiHandle, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Stores key -> value, failing with `KeyExists` when the key is
    /// already present (unique index semantics)
    fn put_no_overwrite(&mut self, dbi: DbiHandle, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Removes one value under a key (or the whole key when `value` is
    /// None); missing entries are not an error
    fn delete(&mut self, dbi: DbiHandle, key: &[u8], value: Option<&[u8]>) -> StorageResult<()>;
}
