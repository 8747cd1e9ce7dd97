//! Document value model and wire codec.
//!
//! # API
//!
//! - `Value` - decoded, zero-copy value view over a document buffer
//! - `RawDocument` / `RawIter` - borrowed element walk, no allocation
//! - `DocumentBuilder` / `OwnedDocument` - canonical document construction
//! - `ObjectId`, `Decimal128` - identifier and decimal scalar types
//!
//! All comparison, key extraction, and planning logic in the crate operates
//! on these types; the byte layout doubles as the on-disk index-key format.

mod decimal;
mod document;
pub mod errors;
mod value;

pub use decimal::Decimal128;
pub use document::{DocumentBuilder, OwnedDocument, RawDocument, RawIter};
pub use errors::{DecodeError, DecodeResult};
pub use value::{ObjectId, Value};
