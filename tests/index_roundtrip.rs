//! Index key pipeline: extraction, serialization, comparator ordering,
//! and document-identity encoding, end to end against the embedded
//! engine.

use std::cmp::Ordering;

use bisondb::bson::{ObjectId, OwnedDocument, Value};
use bisondb::index::{
    decode_doc_id, deserialize_key, encode_doc_id, extract_key, serialize_key, should_index,
    IndexKeyComparator, IndexSpec,
};
use bisondb::storage::KeyComparator;
use serde_json::json;

fn doc(json: serde_json::Value) -> OwnedDocument {
    OwnedDocument::from_json(&json).unwrap()
}

fn key_bytes(document: &OwnedDocument, spec: &IndexSpec) -> Vec<u8> {
    let key = extract_key(document.as_raw(), spec).unwrap();
    serialize_key(&key).to_vec()
}

#[test]
fn test_key_bytes_roundtrip_identically() {
    let document = doc(json!({"name": "Doe", "profile": {"age": 30}}));
    let spec = IndexSpec::new().asc("name").desc("profile.age").asc("gone");

    let key = extract_key(document.as_raw(), &spec).unwrap();
    let bytes = serialize_key(&key).to_vec();
    let view = deserialize_key(&bytes).unwrap();

    assert_eq!(view.get("name").unwrap(), Some(Value::String("Doe")));
    assert_eq!(view.get("profile.age").unwrap(), Some(Value::Int32(30)));
    assert_eq!(view.get("gone").unwrap(), Some(Value::Null));
    assert_eq!(view.bytes(), bytes.as_slice());
}

#[test]
fn test_comparator_orders_by_value_not_bytes() {
    let spec = IndexSpec::new().asc("n");
    let comparator = IndexKeyComparator::new(&spec);

    // Int64 vs Double: different tags and widths, numeric order decides.
    let small = key_bytes(&doc(json!({"n": 2.5})), &spec);
    let large = key_bytes(&doc(json!({"n": 3})), &spec);
    assert_eq!(comparator.compare(&small, &large), Ordering::Less);
    assert_eq!(comparator.compare(&large, &small), Ordering::Greater);

    let equal = key_bytes(&doc(json!({"n": 3.0})), &spec);
    assert_eq!(comparator.compare(&large, &equal), Ordering::Equal);
}

#[test]
fn test_descending_direction_inverts_per_field() {
    let spec = IndexSpec::new().asc("a").desc("b");
    let comparator = IndexKeyComparator::new(&spec);

    // Same leading field: the descending second field decides, inverted.
    let high_b = key_bytes(&doc(json!({"a": 1, "b": 9})), &spec);
    let low_b = key_bytes(&doc(json!({"a": 1, "b": 2})), &spec);
    assert_eq!(comparator.compare(&high_b, &low_b), Ordering::Less);

    // Different leading field: ascending order stands regardless of b.
    let later_a = key_bytes(&doc(json!({"a": 2, "b": 9})), &spec);
    assert_eq!(comparator.compare(&low_b, &later_a), Ordering::Less);
}

#[test]
fn test_absent_field_sorts_with_explicit_null() {
    let spec = IndexSpec::new().asc("email");
    let comparator = IndexKeyComparator::new(&spec);

    let absent = key_bytes(&doc(json!({"name": "Doe"})), &spec);
    let null = key_bytes(&doc(json!({"email": null})), &spec);
    let present = key_bytes(&doc(json!({"email": "x@y.z"})), &spec);

    assert_eq!(comparator.compare(&absent, &null), Ordering::Equal);
    assert_eq!(comparator.compare(&absent, &present), Ordering::Less);
}

#[test]
fn test_malformed_key_bytes_never_panic() {
    let spec = IndexSpec::new().asc("a");
    let comparator = IndexKeyComparator::new(&spec);
    let good = key_bytes(&doc(json!({"a": 1})), &spec);

    // Truncated and garbage inputs get a deterministic answer.
    let truncated = &good[..3];
    assert_eq!(
        comparator.compare(truncated, &good),
        comparator.compare(truncated, &good)
    );
    assert_eq!(comparator.compare(truncated, truncated), Ordering::Equal);
}

#[test]
fn test_sparse_policy_requires_one_present_field() {
    let spec = IndexSpec::new().asc("email").asc("phone");

    let neither = doc(json!({"name": "Doe"}));
    let nulls = doc(json!({"email": null, "phone": null}));
    let one = doc(json!({"phone": "555"}));

    assert!(!should_index(neither.as_raw(), &spec, true).unwrap());
    assert!(!should_index(nulls.as_raw(), &spec, true).unwrap());
    assert!(should_index(one.as_raw(), &spec, true).unwrap());

    // Non-sparse indexes every document.
    assert!(should_index(neither.as_raw(), &spec, false).unwrap());
}

#[test]
fn test_object_id_identity_is_raw_bytes() {
    let oid = ObjectId::new();
    let encoded = encode_doc_id(&Value::ObjectId(oid));
    assert_eq!(encoded.as_slice(), oid.bytes());

    match decode_doc_id(&encoded).unwrap() {
        Some(Value::ObjectId(decoded)) => assert_eq!(decoded.bytes(), oid.bytes()),
        other => panic!("expected object id, got {:?}", other),
    }
}

#[test]
fn test_non_object_id_identity_wraps() {
    let encoded = encode_doc_id(&Value::Int64(99));
    let raw = deserialize_key(&encoded).unwrap();
    assert_eq!(raw.get("_id").unwrap(), Some(Value::Int64(99)));
}
