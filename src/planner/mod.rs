//! Equality-query analysis and index selection.
//!
//! The only planning this core does: recognize pure equality-conjunction
//! filters and match them against registered indexes. Everything else
//! falls back to a full collection scan, evaluated elsewhere with the
//! same comparators.
//!
//! # API
//!
//! - `analyze(filter)` - eligibility check + equality field set
//! - `select(analysis, indexes)` - first registered index covered by the
//!   query's equality fields

mod analyzer;
mod selector;

pub use analyzer::{analyze, QueryAnalysis};
pub use selector::select;
