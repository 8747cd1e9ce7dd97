//! Storage engine error types.

use thiserror::Error;

use super::DbiHandle;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors surfaced by the key-value engine contract.
///
/// The core never retries on these; callers fall back to a full scan or
/// apply their own transaction-level retry policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A database handle did not resolve to a registered database
    #[error("unknown database handle {0}")]
    UnknownDatabase(DbiHandle),

    /// A unique-constrained put found the key already present
    #[error("key already exists in database {0}")]
    KeyExists(DbiHandle),

    /// Underlying I/O or resource failure
    #[error("storage I/O failure: {0}")]
    Io(String),
}
