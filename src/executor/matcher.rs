//! Post-lookup revalidation seam.
//!
//! An index hit is never trusted on its own: sparse indexes may have been
//! built from a subset of the filter's fields, and non-unique indexes
//! store several document identities under one key. Every candidate is
//! re-checked against the original, unabridged filter before it is
//! returned.

use crate::bson::{DecodeResult, RawDocument};
use crate::compare::compare_values;
use crate::index::lookup_path;

/// Full-filter predicate evaluation capability.
///
/// The general matcher (operator trees, regex, ...) lives outside this
/// core; it plugs in through this trait. `EqualityMatcher` covers the
/// subset the planner admits.
pub trait Matcher {
    /// True when `document` satisfies every condition in `filter`
    fn matches(&self, filter: RawDocument<'_>, document: RawDocument<'_>) -> DecodeResult<bool>;
}

/// Conjunction-of-equalities matcher.
///
/// Each filter field (dotted paths included) must resolve in the document
/// to a value comparing Equal under the cross-type order. Missing fields
/// never match.
#[derive(Debug, Default, Clone, Copy)]
pub struct EqualityMatcher;

impl Matcher for EqualityMatcher {
    fn matches(&self, filter: RawDocument<'_>, document: RawDocument<'_>) -> DecodeResult<bool> {
        for element in filter.iter() {
            let (name, expected) = element?;
            match lookup_path(document, name)? {
                Some(actual) if compare_values(&actual, &expected).is_eq() => {}
                _ => return Ok(false),
            }
        }
        Ok(true)
    }
}
