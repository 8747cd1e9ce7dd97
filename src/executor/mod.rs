//! Point-lookup execution.
//!
//! Consumes a planner decision: given the chosen index, a read
//! transaction, and the original filter, `lookup_one` seeks the index,
//! resolves document identities against the primary database, and
//! revalidates candidates through a `Matcher`.
//!
//! # API
//!
//! - `lookup_one(txn, matcher, filter, index, primary)` - first match
//! - `Matcher` / `EqualityMatcher` - revalidation seam
//! - `LookupError` - decode or storage failure during the lookup

mod errors;
mod lookup;
mod matcher;

pub use errors::{LookupError, LookupResult};
pub use lookup::lookup_one;
pub use matcher::{EqualityMatcher, Matcher};
