//! Decoded value views and the ObjectId identifier type.
//!
//! `Value` is a closed sum over the wire format's type set. Variants that
//! carry variable-length payloads (strings, documents, arrays, binary)
//! borrow byte ranges from the parent document buffer; nothing is decoded
//! eagerly and nothing is copied on the read path.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use super::decimal::Decimal128;
use super::document::RawDocument;

/// A 12-byte document identifier: 4-byte big-endian unix seconds, 5 random
/// process bytes, 3-byte big-endian counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId {
    bytes: [u8; 12],
}

/// Process-wide increment counter, seeded randomly on first use
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

impl ObjectId {
    /// Generates a fresh identifier
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let random: [u8; 5] = rand::random();
        let count = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random()))
            .fetch_add(1, AtomicOrdering::Relaxed);

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&random);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        Self { bytes }
    }

    /// Wraps raw identifier bytes
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self { bytes }
    }

    /// Returns the raw identifier bytes
    pub fn bytes(&self) -> &[u8; 12] {
        &self.bytes
    }

    /// Returns the embedded creation time, seconds precision
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]]);
        DateTime::from_timestamp(i64::from(seconds), 0).unwrap_or_default()
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.bytes {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A decoded value view borrowing from the parent document buffer.
///
/// The variant fully determines which payload is present; there are no
/// tag-plus-accessor pairs to mismatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    MinKey,
    MaxKey,
    Null,
    Int32(i32),
    Int64(i64),
    Double(f64),
    Decimal128(Decimal128),
    /// UTF-8 string borrowed from the document buffer
    String(&'a str),
    /// Deprecated symbol type; ordered with strings
    Symbol(&'a str),
    /// Embedded document as its raw encoded bytes
    Document(RawDocument<'a>),
    /// Array, encoded as a document with string-integer keys
    Array(RawDocument<'a>),
    Binary {
        subtype: u8,
        bytes: &'a [u8],
    },
    ObjectId(ObjectId),
    Bool(bool),
    /// Milliseconds since the unix epoch, signed
    DateTime(i64),
    /// Internal replication timestamp
    Timestamp {
        seconds: u32,
        increment: u32,
    },
    Regex {
        pattern: &'a str,
        options: &'a str,
    },
    /// Forward-compatible unknown type tag; compares equal to itself
    Unsupported(u8),
}

impl<'a> Value<'a> {
    /// Builds a DateTime value from a chrono instant
    pub fn datetime(instant: DateTime<Utc>) -> Value<'static> {
        Value::DateTime(instant.timestamp_millis())
    }

    /// Returns the chrono instant for DateTime values
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::DateTime(millis) => DateTime::from_timestamp_millis(*millis),
            _ => None,
        }
    }

    /// Returns the string payload for String and Symbol values
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) | Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the embedded document for Document values
    pub fn as_document(&self) -> Option<RawDocument<'a>> {
        match self {
            Value::Document(doc) => Some(*doc),
            _ => None,
        }
    }

    /// Returns the identifier for ObjectId values
    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Value::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }

    /// Returns true for the explicit Null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for any of the four numeric variants
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int32(_) | Value::Int64(_) | Value::Double(_) | Value::Decimal128(_)
        )
    }

    /// Human-readable type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::MinKey => "minKey",
            Value::MaxKey => "maxKey",
            Value::Null => "null",
            Value::Int32(_) => "int",
            Value::Int64(_) => "long",
            Value::Double(_) => "double",
            Value::Decimal128(_) => "decimal",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Document(_) => "object",
            Value::Array(_) => "array",
            Value::Binary { .. } => "binData",
            Value::ObjectId(_) => "objectId",
            Value::Bool(_) => "bool",
            Value::DateTime(_) => "date",
            Value::Timestamp { .. } => "timestamp",
            Value::Regex { .. } => "regex",
            Value::Unsupported(_) => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_uniqueness() {
        let a = ObjectId::new();
        let b = ObjectId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_object_id_hex_display() {
        let oid = ObjectId::from_bytes([
            0x65, 0x0c, 0x1a, 0x2b, 0x3c, 0x4d, 0x5e, 0x6f, 0x70, 0x81, 0x92, 0xa3,
        ]);
        assert_eq!(oid.to_string(), "650c1a2b3c4d5e6f708192a3");
    }

    #[test]
    fn test_object_id_timestamp_roundtrip() {
        let oid = ObjectId::new();
        let now = Utc::now();
        let delta = (now - oid.timestamp()).num_seconds().abs();
        assert!(delta <= 2, "embedded timestamp should be current");
    }

    #[test]
    fn test_datetime_conversion() {
        let now = Utc::now();
        let value = Value::datetime(now);
        let back = value.as_datetime().unwrap();
        assert_eq!(back.timestamp_millis(), now.timestamp_millis());
    }
}
