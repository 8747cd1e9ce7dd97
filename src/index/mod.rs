//! Index key extraction, ordering, and maintenance.
//!
//! # API
//!
//! - `extract_key(doc, spec)` - canonical index key for a document
//! - `key_from_filter(filter, spec)` - lookup key sourced from a query
//! - `serialize_key` / `deserialize_key` - storage byte representation
//! - `IndexKeyComparator` - comparator registered with the storage engine
//! - `should_index(doc, spec, sparse)` - sparse membership policy
//! - `apply_document` / `remove_document` - write-path maintenance
//! - `IndexSpec`, `Direction`, `IndexDescriptor` - index metadata

mod comparator;
mod descriptor;
mod doc_id;
mod key;
mod maintenance;
mod sparse;
mod spec;

pub use comparator::IndexKeyComparator;
pub use descriptor::IndexDescriptor;
pub use doc_id::{decode_doc_id, encode_doc_id};
pub use key::{deserialize_key, extract_key, key_from_filter, serialize_key};
pub(crate) use key::lookup_path;
pub use maintenance::{apply_document, remove_document, MaintenanceError};
pub use sparse::should_index;
pub use spec::{Direction, IndexSpec};
