//! Query filter analysis.
//!
//! Index selection only applies to filters that are pure conjunctions of
//! field-equality tests. Anything operator-shaped (`$gt`, `$or`, ...)
//! disqualifies the whole filter, not just the offending field, and sends
//! the query down the full-scan path.

use crate::bson::{DecodeResult, RawDocument, Value};

/// The identity field has its own fast path outside this planner
const ID_FIELD: &str = "_id";

/// Result of analyzing a pure-equality filter.
///
/// Transient: derived per query, never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnalysis {
    fields: Vec<String>,
}

impl QueryAnalysis {
    /// Ordered, de-duplicated non-identity field names under equality test
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// True if the query supplies an equality value for `field`
    pub fn covers(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f == field)
    }
}

/// Inspects a filter for index-selection eligibility.
///
/// Returns `None` when the filter is empty, contains any `$`-operator key
/// (top level or nested inside a sub-document value), or tests nothing
/// beyond the identity field.
pub fn analyze(filter: RawDocument<'_>) -> DecodeResult<Option<QueryAnalysis>> {
    let mut fields: Vec<String> = Vec::new();
    for element in filter.iter() {
        let (name, value) = element?;
        if name.starts_with('$') {
            return Ok(None);
        }
        if let Value::Document(nested) = value {
            if contains_operator(nested)? {
                return Ok(None);
            }
        }
        if name != ID_FIELD && !fields.iter().any(|f| f == name) {
            fields.push(name.to_string());
        }
    }
    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(QueryAnalysis { fields }))
}

/// Recursively scans sub-document values for operator keys.
///
/// Documents inside arrays are literal values in an equality test and are
/// not scanned.
fn contains_operator(doc: RawDocument<'_>) -> DecodeResult<bool> {
    for element in doc.iter() {
        let (name, value) = element?;
        if name.starts_with('$') {
            return Ok(true);
        }
        if let Value::Document(nested) = value {
            if contains_operator(nested)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
