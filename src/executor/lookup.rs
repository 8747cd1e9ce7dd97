//! Index-backed point lookup.
//!
//! The read path for the one plan shape the planner produces: build the
//! lookup key from the filter, seek it exactly in the index database,
//! then walk the duplicates under that key. Every candidate fetched from
//! the primary database is revalidated against the full filter before it
//! can be the answer.

use crate::bson::{OwnedDocument, RawDocument};
use crate::index::{key_from_filter, IndexDescriptor};
use crate::storage::{DbiHandle, ReadTransaction};

use super::errors::LookupResult;
use super::matcher::Matcher;

/// Fetches the first document matching an equality filter via an index.
///
/// Returns `Ok(None)` when the filter omits an indexed field, the key is
/// absent from the index, or no candidate survives revalidation. A
/// dangling index entry (identity with no primary record, as happens
/// transiently between the write steps of a concurrent delete) is skipped,
/// not an error.
pub fn lookup_one<T, M>(
    txn: &T,
    matcher: &M,
    filter: RawDocument<'_>,
    index: &IndexDescriptor,
    primary: DbiHandle,
) -> LookupResult<Option<OwnedDocument>>
where
    T: ReadTransaction,
    M: Matcher,
{
    let key = match key_from_filter(filter, &index.spec)? {
        Some(key) => key,
        None => return Ok(None),
    };

    let mut cursor = txn.cursor(index.dbi)?;
    let mut entry = cursor.seek_exact(key.as_bytes())?;
    while let Some(id_bytes) = entry {
        if let Some(doc_bytes) = txn.get(primary, &id_bytes)? {
            let document = OwnedDocument::from_bytes(doc_bytes)?;
            if matcher.matches(filter, document.as_raw())? {
                return Ok(Some(document));
            }
        }
        entry = cursor.next_duplicate()?;
    }
    Ok(None)
}
