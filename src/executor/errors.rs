//! Point-lookup error types.

use thiserror::Error;

use crate::bson::DecodeError;
use crate::storage::StorageError;

/// Result type for point lookups
pub type LookupResult<T> = Result<T, LookupError>;

/// Failures during an index-backed point lookup.
///
/// Both variants abort the lookup without retry; the caller's
/// transaction-level policy decides whether to retry or fall back to a
/// full scan.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Malformed filter or stored document bytes
    #[error("malformed document or filter: {0}")]
    Decode(#[from] DecodeError),

    /// Storage engine failure while seeking or fetching
    #[error("storage engine failure: {0}")]
    Storage(#[from] StorageError),
}
