//! Index selection over analyzed equality queries.
//!
//! Deterministic and cost-free: the first registered index whose key
//! fields are all supplied by the query wins. No cost comparison between
//! eligible candidates, no range support, no multi-index intersection.

use crate::index::IndexDescriptor;

use super::analyzer::QueryAnalysis;

/// Picks the index to serve a pure-equality query, if any.
///
/// An index is eligible when every one of its spec fields has an equality
/// value in the query (its field set is a subset of the query's). Indexes
/// with empty specs are never eligible. Candidates are considered in
/// registration order; the first eligible one wins.
pub fn select<'a>(
    analysis: &QueryAnalysis,
    indexes: &'a [IndexDescriptor],
) -> Option<&'a IndexDescriptor> {
    indexes.iter().find(|index| {
        !index.spec.is_empty() && index.spec.field_paths().all(|path| analysis.covers(path))
    })
}
