//! Index key extraction and (de)serialization.
//!
//! An index key is itself a document: one element per spec field, in spec
//! order, named by the *original* dotted path so the key is
//! self-describing. A field the document does not reach contributes an
//! explicit Null, keeping arity and position stable. Directions are not
//! baked into values; the storage-engine comparator applies them.
//!
//! Serialization is the wire format's own canonical encoding, so the key
//! round-trips byte-identically - the storage engine persists these bytes
//! as its on-disk keys.

use crate::bson::{DecodeResult, DocumentBuilder, OwnedDocument, RawDocument, Value};

use super::spec::IndexSpec;

/// Extracts the index key for a document under a spec.
///
/// Never fails on a well-formed document; malformed bytes propagate the
/// decode error unchanged.
pub fn extract_key(doc: RawDocument<'_>, spec: &IndexSpec) -> DecodeResult<OwnedDocument> {
    let mut builder = DocumentBuilder::new();
    for path in spec.field_paths() {
        match lookup_path(doc, path)? {
            Some(value) => builder.append(path, &value),
            None => builder.append(path, &Value::Null),
        };
    }
    Ok(builder.finish())
}

/// Builds a lookup key from a query filter under a spec.
///
/// Same dotted-path resolution as `extract_key`, but sourced from the
/// filter: if any spec field is absent the index cannot serve the query
/// and the result is `None`.
pub fn key_from_filter(
    filter: RawDocument<'_>,
    spec: &IndexSpec,
) -> DecodeResult<Option<OwnedDocument>> {
    let mut builder = DocumentBuilder::new();
    for path in spec.field_paths() {
        match lookup_path(filter, path)? {
            Some(value) => builder.append(path, &value),
            None => return Ok(None),
        };
    }
    Ok(Some(builder.finish()))
}

/// Resolves a possibly-dotted field path.
///
/// A literal top-level field named exactly like the dotted path wins over
/// nested traversal; otherwise each `.` segment is a field lookup in the
/// current sub-document.
pub(crate) fn lookup_path<'a>(
    doc: RawDocument<'a>,
    path: &str,
) -> DecodeResult<Option<Value<'a>>> {
    if let Some(value) = doc.get(path)? {
        return Ok(Some(value));
    }
    if !path.contains('.') {
        return Ok(None);
    }

    let mut current = doc;
    let mut segments = path.split('.').peekable();
    while let Some(segment) = segments.next() {
        match current.get(segment)? {
            Some(value) if segments.peek().is_none() => return Ok(Some(value)),
            Some(Value::Document(nested)) => current = nested,
            _ => return Ok(None),
        }
    }
    Ok(None)
}

/// Returns the storage-engine byte representation of a key
pub fn serialize_key(key: &OwnedDocument) -> &[u8] {
    key.as_bytes()
}

/// Reinterprets stored key bytes as a document view, without copying.
///
/// The bytes must stay valid for the call's duration, per the storage
/// engine's transaction-scoped memory contract.
pub fn deserialize_key(bytes: &[u8]) -> DecodeResult<RawDocument<'_>> {
    RawDocument::new(bytes)
}
