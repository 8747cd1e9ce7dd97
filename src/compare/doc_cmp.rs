//! Recursive field-by-field document comparison.
//!
//! Field order and field count are part of a document's identity: the walk
//! is lockstep over both documents in insertion order, the first mismatch
//! in name or value decides, and when one side runs out of fields the
//! shorter document is Less. Arrays go through the same walk since their
//! elements are encoded as documents with string-integer keys.

use std::cmp::Ordering;

use crate::bson::{RawDocument, RawIter, Value};

use super::value_cmp::compare_values;

/// Compares two documents under the lockstep field walk
pub fn compare_documents(a: RawDocument<'_>, b: RawDocument<'_>) -> Ordering {
    let mut left = a.iter();
    let mut right = b.iter();
    loop {
        match (next_element(&mut left), next_element(&mut right)) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some((name_a, value_a)), Some((name_b, value_b))) => {
                let by_name = name_a.as_bytes().cmp(name_b.as_bytes());
                if by_name != Ordering::Equal {
                    return by_name;
                }
                let by_value = compare_values(&value_a, &value_b);
                if by_value != Ordering::Equal {
                    return by_value;
                }
            }
        }
    }
}

/// Advances one side of the walk.
///
/// A decode failure must never destabilize B-tree ordering, so a malformed
/// side is treated as exhausted: deterministic, and consistent across
/// repeated calls on the same bytes.
fn next_element<'a>(iter: &mut RawIter<'a>) -> Option<(&'a str, Value<'a>)> {
    match iter.next() {
        Some(Ok(element)) => Some(element),
        Some(Err(_)) | None => None,
    }
}
