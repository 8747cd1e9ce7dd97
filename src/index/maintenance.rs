//! Index maintenance on document writes.
//!
//! Pure composition of the public building blocks: sparse gating, key
//! extraction, identity encoding, storage put/delete. The embedded engine
//! and the test harnesses drive writes through here; a full index-
//! management layer would do the same calls in the same order.

use crate::bson::{RawDocument, Value};
use crate::storage::WriteHandle;

use super::descriptor::IndexDescriptor;
use super::doc_id::encode_doc_id;
use super::key::extract_key;
use super::sparse::should_index;

/// Errors from applying a document to an index
#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("malformed document: {0}")]
    Decode(#[from] crate::bson::DecodeError),
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

/// Adds a document's entry to one index.
///
/// Sparse indexes may skip the document entirely; unique indexes reject a
/// second document under the same key.
pub fn apply_document<W: WriteHandle>(
    engine: &mut W,
    index: &IndexDescriptor,
    doc: RawDocument<'_>,
    id: &Value<'_>,
) -> Result<bool, MaintenanceError> {
    if !should_index(doc, &index.spec, index.sparse)? {
        return Ok(false);
    }
    let key = extract_key(doc, &index.spec)?;
    let id_bytes = encode_doc_id(id);
    if index.unique {
        engine.put_no_overwrite(index.dbi, key.as_bytes(), &id_bytes)?;
    } else {
        engine.put(index.dbi, key.as_bytes(), &id_bytes)?;
    }
    Ok(true)
}

/// Removes a document's entry from one index.
///
/// The same sparse gating applies: a document that was never indexed has
/// nothing to remove.
pub fn remove_document<W: WriteHandle>(
    engine: &mut W,
    index: &IndexDescriptor,
    doc: RawDocument<'_>,
    id: &Value<'_>,
) -> Result<(), MaintenanceError> {
    if !should_index(doc, &index.spec, index.sparse)? {
        return Ok(());
    }
    let key = extract_key(doc, &index.spec)?;
    let id_bytes = encode_doc_id(id);
    engine.delete(index.dbi, key.as_bytes(), Some(&id_bytes))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bson::OwnedDocument;
    use crate::index::{IndexKeyComparator, IndexSpec};
    use crate::storage::{MemoryEngine, ReadTransaction, StorageError};
    use serde_json::json;
    use std::sync::Arc;

    fn doc(json: serde_json::Value) -> OwnedDocument {
        OwnedDocument::from_json(&json).unwrap()
    }

    fn engine_with_index(spec: IndexSpec, unique: bool, sparse: bool) -> (MemoryEngine, IndexDescriptor) {
        let mut engine = MemoryEngine::new();
        let comparator = Arc::new(IndexKeyComparator::new(&spec));
        let dbi = engine.create_database("idx", Some(comparator), !unique);
        let mut descriptor = IndexDescriptor::new("idx", spec, dbi);
        if unique {
            descriptor = descriptor.unique();
        }
        if sparse {
            descriptor = descriptor.sparse();
        }
        (engine, descriptor)
    }

    #[test]
    fn test_apply_then_seek() {
        let (mut engine, index) = engine_with_index(IndexSpec::new().asc("name"), false, false);
        let document = doc(json!({"name": "Doe", "age": 30}));

        let indexed =
            apply_document(&mut engine, &index, document.as_raw(), &Value::Int32(1)).unwrap();
        assert!(indexed);

        let key = extract_key(document.as_raw(), &index.spec).unwrap();
        let txn = engine.begin_read();
        let mut cursor = txn.cursor(index.dbi).unwrap();
        assert!(cursor.seek_exact(key.as_bytes()).unwrap().is_some());
    }

    #[test]
    fn test_sparse_document_skipped() {
        let (mut engine, index) = engine_with_index(IndexSpec::new().asc("email"), false, true);
        let document = doc(json!({"name": "Doe"}));

        let indexed =
            apply_document(&mut engine, &index, document.as_raw(), &Value::Int32(1)).unwrap();
        assert!(!indexed);
    }

    #[test]
    fn test_unique_violation_surfaces() {
        let (mut engine, index) = engine_with_index(IndexSpec::new().asc("email"), true, false);
        let first = doc(json!({"email": "x@y.z"}));
        let second = doc(json!({"email": "x@y.z"}));

        apply_document(&mut engine, &index, first.as_raw(), &Value::Int32(1)).unwrap();
        let err = apply_document(&mut engine, &index, second.as_raw(), &Value::Int32(2))
            .unwrap_err();
        assert!(matches!(
            err,
            MaintenanceError::Storage(StorageError::KeyExists(_))
        ));
    }

    #[test]
    fn test_remove_clears_entry() {
        let (mut engine, index) = engine_with_index(IndexSpec::new().asc("name"), false, false);
        let document = doc(json!({"name": "Doe"}));

        apply_document(&mut engine, &index, document.as_raw(), &Value::Int32(1)).unwrap();
        remove_document(&mut engine, &index, document.as_raw(), &Value::Int32(1)).unwrap();

        let key = extract_key(document.as_raw(), &index.spec).unwrap();
        let txn = engine.begin_read();
        let mut cursor = txn.cursor(index.dbi).unwrap();
        assert!(cursor.seek_exact(key.as_bytes()).unwrap().is_none());
    }
}
