//! Sparse-index membership policy.
//!
//! A sparse index omits documents that carry none of its fields: no entry
//! is written at all, as opposed to an entry with Null placeholders.

use crate::bson::DecodeResult;
use crate::bson::RawDocument;

use super::key::lookup_path;
use super::spec::IndexSpec;

/// Decides whether a document belongs in an index.
///
/// Non-sparse indexes accept every document. Sparse indexes accept a
/// document as soon as any spec field resolves (same dotted-path rules as
/// key extraction) to a present, non-Null value.
pub fn should_index(doc: RawDocument<'_>, spec: &IndexSpec, sparse: bool) -> DecodeResult<bool> {
    if !sparse {
        return Ok(true);
    }
    for path in spec.field_paths() {
        if let Some(value) = lookup_path(doc, path)? {
            if !value.is_null() {
                return Ok(true);
            }
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bson::OwnedDocument;
    use serde_json::json;

    fn doc(json: serde_json::Value) -> OwnedDocument {
        OwnedDocument::from_json(&json).unwrap()
    }

    #[test]
    fn test_non_sparse_always_indexes() {
        let document = doc(json!({"other": 1}));
        let spec = IndexSpec::new().asc("email");
        assert!(should_index(document.as_raw(), &spec, false).unwrap());
    }

    #[test]
    fn test_sparse_excludes_absent_and_null() {
        let spec = IndexSpec::new().asc("email").asc("phone");

        let absent = doc(json!({"name": "Doe"}));
        assert!(!should_index(absent.as_raw(), &spec, true).unwrap());

        let null_only = doc(json!({"email": null, "phone": null}));
        assert!(!should_index(null_only.as_raw(), &spec, true).unwrap());
    }

    #[test]
    fn test_sparse_includes_on_any_present_field() {
        let spec = IndexSpec::new().asc("email").asc("phone");

        let partial = doc(json!({"email": null, "phone": "555-0100"}));
        assert!(should_index(partial.as_raw(), &spec, true).unwrap());
    }

    #[test]
    fn test_sparse_resolves_dotted_paths() {
        let spec = IndexSpec::new().asc("contact.email");

        let nested = doc(json!({"contact": {"email": "x@y.z"}}));
        assert!(should_index(nested.as_raw(), &spec, true).unwrap());

        let wrong_shape = doc(json!({"contact": "none"}));
        assert!(!should_index(wrong_shape.as_raw(), &spec, true).unwrap());
    }
}
