//! Cross-type value and document ordering.
//!
//! One comparator pair serves predicate evaluation, index B-tree ordering,
//! and sort semantics; any divergence between those uses would corrupt the
//! index, so everything funnels through these two functions.
//!
//! # API
//!
//! - `compare_values(a, b)` - total order over decoded values
//! - `compare_documents(a, b)` - lockstep field-by-field document order
//!
//! Both are pure, allocation-free, and safe to call concurrently.

mod doc_cmp;
mod value_cmp;

pub use doc_cmp::compare_documents;
pub use value_cmp::compare_values;
