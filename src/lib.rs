//! bisondb - comparison, indexing, and query-selection core of an
//! embedded, wire-compatible document database.
//!
//! Documents are immutable byte buffers in the standard binary document
//! format, viewed zero-copy through [`bson::RawDocument`]. On top of that
//! sit the cross-type value and document orders ([`compare`]), index key
//! extraction and ordering ([`index`]), equality-query analysis and index
//! selection ([`planner`]), and the index-backed point lookup
//! ([`executor`]). The [`storage`] module defines the ordered key-value
//! contract the core consumes and ships an embedded in-memory engine.

pub mod bson;
pub mod compare;
pub mod executor;
pub mod index;
pub mod planner;
pub mod storage;
