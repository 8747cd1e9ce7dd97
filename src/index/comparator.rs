//! Byte-key comparator registered with the storage engine.
//!
//! Decodes both key buffers as documents without copying and walks them in
//! lockstep, applying each spec position's direction to the value
//! comparison only (field names and arity keep their natural order). The
//! engine invokes this during cursor operations from multiple reader
//! threads; the implementation is stateless apart from the direction list
//! captured at index-creation time.

use std::cmp::Ordering;

use crate::bson::{RawDocument, Value};
use crate::compare::compare_values;
use crate::storage::KeyComparator;

use super::spec::{Direction, IndexSpec};

/// Orders encoded index keys under a spec's per-field directions
#[derive(Debug, Clone)]
pub struct IndexKeyComparator {
    directions: Vec<Direction>,
}

impl IndexKeyComparator {
    /// Captures the direction metadata of a spec
    pub fn new(spec: &IndexSpec) -> Self {
        Self {
            directions: spec.directions(),
        }
    }

    fn direction_at(&self, position: usize) -> Direction {
        self.directions
            .get(position)
            .copied()
            .unwrap_or(Direction::Ascending)
    }
}

impl KeyComparator for IndexKeyComparator {
    fn compare(&self, a: &[u8], b: &[u8]) -> Ordering {
        // Malformed keys must not destabilize the B-tree: an undecodable
        // side is treated as an empty document, deterministically.
        let doc_a = RawDocument::new(a);
        let doc_b = RawDocument::new(b);
        let mut left = doc_a.iter().flat_map(RawDocument::iter);
        let mut right = doc_b.iter().flat_map(RawDocument::iter);

        let mut position = 0;
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
                        return match self.direction_at(position) {
                            Direction::Ascending => by_value,
                            Direction::Descending => by_value.reverse(),
                        };
                    }
                }
            }
            position += 1;
        }
    }
}

fn next_element<'a>(
    iter: &mut impl Iterator<Item = crate::bson::DecodeResult<(&'a str, Value<'a>)>>,
) -> Option<(&'a str, Value<'a>)> {
    match iter.next() {
        Some(Ok(element)) => Some(element),
        Some(Err(_)) | None => None,
    }
}
