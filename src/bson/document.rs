//! Document wire format: borrowed views, iteration, and construction.
//!
//! The encoding is the standard BSON layout, restricted to the type set in
//! `Value`:
//!
//! ```text
//! +------------------+
//! | Total Length     | (i32 LE, includes itself and the terminator)
//! +------------------+
//! | Element*         | (type tag u8, NUL-terminated name, payload)
//! +------------------+
//! | Terminator       | (0x00)
//! +------------------+
//! ```
//!
//! `RawDocument` walks a shared buffer without copying; `DocumentBuilder`
//! appends (name, value) pairs in call order and finalizes to an immutable
//! byte buffer. The encoding is canonical: re-encoding the same logical
//! document yields byte-identical output, which is what lets index keys be
//! persisted as raw storage-engine keys.

use super::decimal::Decimal128;
use super::errors::{DecodeError, DecodeResult};
use super::value::{ObjectId, Value};

const TAG_DOUBLE: u8 = 0x01;
const TAG_STRING: u8 = 0x02;
const TAG_DOCUMENT: u8 = 0x03;
const TAG_ARRAY: u8 = 0x04;
const TAG_BINARY: u8 = 0x05;
const TAG_OBJECT_ID: u8 = 0x07;
const TAG_BOOL: u8 = 0x08;
const TAG_DATETIME: u8 = 0x09;
const TAG_NULL: u8 = 0x0A;
const TAG_REGEX: u8 = 0x0B;
const TAG_SYMBOL: u8 = 0x0E;
const TAG_INT32: u8 = 0x10;
const TAG_TIMESTAMP: u8 = 0x11;
const TAG_INT64: u8 = 0x12;
const TAG_DECIMAL128: u8 = 0x13;
const TAG_MAX_KEY: u8 = 0x7F;
const TAG_MIN_KEY: u8 = 0xFF;

/// Smallest valid document: length prefix plus terminator
const MIN_DOCUMENT_LEN: usize = 5;

/// A borrowed, validated view over an encoded document.
///
/// Holds only the byte slice; all access happens through iteration. The
/// buffer must stay alive and unmodified for the lifetime of the view,
/// which the storage engine guarantees for the duration of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDocument<'a> {
    bytes: &'a [u8],
}

impl<'a> RawDocument<'a> {
    /// Validates the framing of an encoded document and wraps it.
    ///
    /// Only the outer frame is checked here; element payloads are validated
    /// lazily during iteration.
    pub fn new(bytes: &'a [u8]) -> DecodeResult<Self> {
        if bytes.len() < MIN_DOCUMENT_LEN {
            return Err(DecodeError::Truncated {
                offset: 0,
                needed: MIN_DOCUMENT_LEN - bytes.len(),
            });
        }
        let declared = i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if declared < MIN_DOCUMENT_LEN as i32 || declared as usize != bytes.len() {
            return Err(DecodeError::LengthMismatch {
                declared: declared.max(0) as usize,
                actual: bytes.len(),
            });
        }
        if bytes[bytes.len() - 1] != 0 {
            return Err(DecodeError::MissingTerminator);
        }
        Ok(Self { bytes })
    }

    /// Wraps bytes known to be a valid encoding (builder output)
    pub(crate) fn trusted(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Returns the underlying encoded bytes
    pub fn bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Returns an element iterator over (name, value) pairs
    pub fn iter(&self) -> RawIter<'a> {
        RawIter {
            bytes: self.bytes,
            offset: 4,
            done: false,
        }
    }

    /// Looks up a top-level field by name.
    ///
    /// Field names compare byte-wise; the first match wins.
    pub fn get(&self, name: &str) -> DecodeResult<Option<Value<'a>>> {
        for element in self.iter() {
            let (field, value) = element?;
            if field == name {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Returns true if the document holds no elements
    pub fn is_empty(&self) -> bool {
        self.bytes.len() == MIN_DOCUMENT_LEN
    }
}

/// Cursor over the elements of a `RawDocument`.
///
/// Decode failures are terminal: after yielding an error the iterator is
/// exhausted. An unrecognized type tag yields `Value::Unsupported` and then
/// ends the walk, since the payload length of an unknown tag is unknowable.
pub struct RawIter<'a> {
    bytes: &'a [u8],
    offset: usize,
    done: bool,
}

impl<'a> RawIter<'a> {
    fn remaining(&self) -> usize {
        // The final terminator byte is not element data.
        self.bytes.len().saturating_sub(1).saturating_sub(self.offset)
    }

    fn take(&mut self, n: usize) -> DecodeResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                offset: self.offset,
                needed: n - self.remaining(),
            });
        }
        let slice = &self.bytes[self.offset..self.offset + n];
        self.offset += n;
        Ok(slice)
    }

    fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    fn read_i32(&mut self) -> DecodeResult<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn read_i64(&mut self) -> DecodeResult<i64> {
        let b = self.take(8)?;
        Ok(i64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
    }

    fn read_cstring(&mut self) -> DecodeResult<&'a str> {
        let start = self.offset;
        let rest = &self.bytes[self.offset..self.bytes.len() - 1];
        let nul = rest
            .iter()
            .position(|&b| b == 0)
            .ok_or(DecodeError::Truncated {
                offset: start,
                needed: 1,
            })?;
        let raw = &rest[..nul];
        self.offset += nul + 1;
        std::str::from_utf8(raw).map_err(|_| DecodeError::InvalidFieldName(start))
    }

    /// Reads a length-prefixed string (length includes the trailing NUL)
    fn read_string(&mut self, field: &str) -> DecodeResult<&'a str> {
        let len = self.read_i32()?;
        if len < 1 {
            return Err(DecodeError::InvalidStringLength(len));
        }
        let raw = self.take(len as usize)?;
        let (payload, terminator) = raw.split_at(raw.len() - 1);
        if terminator != [0] {
            return Err(DecodeError::InvalidStringLength(len));
        }
        std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8(field.to_string()))
    }

    /// Reads an embedded document or array payload
    fn read_document(&mut self) -> DecodeResult<RawDocument<'a>> {
        let start = self.offset;
        let len = self.read_i32()?;
        if len < MIN_DOCUMENT_LEN as i32 {
            return Err(DecodeError::InvalidNestedLength(len));
        }
        self.offset = start;
        let slice = self.take(len as usize)?;
        RawDocument::new(slice)
    }

    fn element(&mut self, tag: u8) -> DecodeResult<(&'a str, Value<'a>)> {
        let name = self.read_cstring()?;
        let value = match tag {
            TAG_DOUBLE => Value::Double(f64::from_bits(self.read_i64()? as u64)),
            TAG_STRING => Value::String(self.read_string(name)?),
            TAG_SYMBOL => Value::Symbol(self.read_string(name)?),
            TAG_DOCUMENT => Value::Document(self.read_document()?),
            TAG_ARRAY => Value::Array(self.read_document()?),
            TAG_BINARY => {
                let len = self.read_i32()?;
                if len < 0 {
                    return Err(DecodeError::InvalidNestedLength(len));
                }
                let subtype = self.read_u8()?;
                let bytes = self.take(len as usize)?;
                Value::Binary { subtype, bytes }
            }
            TAG_OBJECT_ID => {
                let raw = self.take(12)?;
                let mut bytes = [0u8; 12];
                bytes.copy_from_slice(raw);
                Value::ObjectId(ObjectId::from_bytes(bytes))
            }
            TAG_BOOL => Value::Bool(self.read_u8()? != 0),
            TAG_DATETIME => Value::DateTime(self.read_i64()?),
            TAG_NULL => Value::Null,
            TAG_REGEX => {
                let pattern = self.read_cstring()?;
                let options = self.read_cstring()?;
                Value::Regex { pattern, options }
            }
            TAG_INT32 => Value::Int32(self.read_i32()?),
            TAG_TIMESTAMP => {
                // Low 32 bits increment, high 32 bits seconds.
                let raw = self.read_i64()? as u64;
                Value::Timestamp {
                    seconds: (raw >> 32) as u32,
                    increment: raw as u32,
                }
            }
            TAG_INT64 => Value::Int64(self.read_i64()?),
            TAG_DECIMAL128 => {
                let raw = self.take(16)?;
                let mut bytes = [0u8; 16];
                bytes.copy_from_slice(raw);
                Value::Decimal128(Decimal128::from_bytes(bytes))
            }
            TAG_MIN_KEY => Value::MinKey,
            TAG_MAX_KEY => Value::MaxKey,
            unknown => {
                // Unknown payload length: surface the tag, end the walk.
                self.done = true;
                Value::Unsupported(unknown)
            }
        };
        Ok((name, value))
    }
}

impl<'a> Iterator for RawIter<'a> {
    type Item = DecodeResult<(&'a str, Value<'a>)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.remaining() == 0 {
            return None;
        }
        let tag = self.bytes[self.offset];
        if tag == 0 {
            self.done = true;
            return None;
        }
        self.offset += 1;
        match self.element(tag) {
            Ok(item) => Some(Ok(item)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

/// Incremental document encoder.
///
/// Appends (name, value) pairs in call order; `finish` seals the buffer.
/// Field names must not contain NUL bytes (a programming error, not a data
/// error).
#[derive(Debug)]
pub struct DocumentBuilder {
    buf: Vec<u8>,
}

impl DocumentBuilder {
    /// Starts an empty document
    pub fn new() -> Self {
        Self {
            buf: vec![0, 0, 0, 0],
        }
    }

    /// Appends one element, re-encoding the value canonically.
    ///
    /// Document and array values are copied as their raw sub-slices, so a
    /// key built from extracted values stays byte-identical to the source
    /// encoding.
    pub fn append(&mut self, name: &str, value: &Value<'_>) -> &mut Self {
        debug_assert!(!name.as_bytes().contains(&0), "field name contains NUL");
        let tag = match value {
            Value::Double(_) => TAG_DOUBLE,
            Value::String(_) => TAG_STRING,
            Value::Symbol(_) => TAG_SYMBOL,
            Value::Document(_) => TAG_DOCUMENT,
            Value::Array(_) => TAG_ARRAY,
            Value::Binary { .. } => TAG_BINARY,
            Value::ObjectId(_) => TAG_OBJECT_ID,
            Value::Bool(_) => TAG_BOOL,
            Value::DateTime(_) => TAG_DATETIME,
            Value::Null => TAG_NULL,
            Value::Regex { .. } => TAG_REGEX,
            Value::Int32(_) => TAG_INT32,
            Value::Timestamp { .. } => TAG_TIMESTAMP,
            Value::Int64(_) => TAG_INT64,
            Value::Decimal128(_) => TAG_DECIMAL128,
            Value::MinKey => TAG_MIN_KEY,
            Value::MaxKey => TAG_MAX_KEY,
            Value::Unsupported(tag) => *tag,
        };
        self.buf.push(tag);
        self.buf.extend_from_slice(name.as_bytes());
        self.buf.push(0);

        match value {
            Value::Double(v) => self.buf.extend_from_slice(&v.to_bits().to_le_bytes()),
            Value::String(s) | Value::Symbol(s) => {
                self.buf
                    .extend_from_slice(&((s.len() + 1) as i32).to_le_bytes());
                self.buf.extend_from_slice(s.as_bytes());
                self.buf.push(0);
            }
            Value::Document(doc) | Value::Array(doc) => {
                self.buf.extend_from_slice(doc.bytes());
            }
            Value::Binary { subtype, bytes } => {
                self.buf.extend_from_slice(&(bytes.len() as i32).to_le_bytes());
                self.buf.push(*subtype);
                self.buf.extend_from_slice(bytes);
            }
            Value::ObjectId(oid) => self.buf.extend_from_slice(oid.bytes()),
            Value::Bool(v) => self.buf.push(u8::from(*v)),
            Value::DateTime(millis) => self.buf.extend_from_slice(&millis.to_le_bytes()),
            Value::Regex { pattern, options } => {
                self.buf.extend_from_slice(pattern.as_bytes());
                self.buf.push(0);
                self.buf.extend_from_slice(options.as_bytes());
                self.buf.push(0);
            }
            Value::Int32(v) => self.buf.extend_from_slice(&v.to_le_bytes()),
            Value::Timestamp { seconds, increment } => {
                let raw = (u64::from(*seconds) << 32) | u64::from(*increment);
                self.buf.extend_from_slice(&raw.to_le_bytes());
            }
            Value::Int64(v) => self.buf.extend_from_slice(&v.to_le_bytes()),
            Value::Decimal128(d) => self.buf.extend_from_slice(d.bytes()),
            Value::Null | Value::MinKey | Value::MaxKey | Value::Unsupported(_) => {}
        }
        self
    }

    /// Seals the buffer and patches the length prefix
    pub fn finish(mut self) -> OwnedDocument {
        self.buf.push(0);
        let len = self.buf.len() as i32;
        self.buf[0..4].copy_from_slice(&len.to_le_bytes());
        OwnedDocument { bytes: self.buf }
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A finalized, immutable document buffer.
///
/// Equality is byte-exact, which is the identity the index round-trip
/// guarantees rely on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedDocument {
    bytes: Vec<u8>,
}

impl OwnedDocument {
    /// The empty document
    pub fn empty() -> Self {
        DocumentBuilder::new().finish()
    }

    /// Validates and takes ownership of encoded bytes
    pub fn from_bytes(bytes: Vec<u8>) -> DecodeResult<Self> {
        RawDocument::new(&bytes)?;
        Ok(Self { bytes })
    }

    /// Builds a document from a JSON object, preserving field order.
    ///
    /// Integers map to Int32 when they fit, else Int64; other numbers map
    /// to Double. Returns None when the JSON value is not an object.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        let map = value.as_object()?;
        let mut builder = DocumentBuilder::new();
        for (name, item) in map {
            append_json(&mut builder, name, item);
        }
        Some(builder.finish())
    }

    /// Returns a borrowed view over the buffer
    pub fn as_raw(&self) -> RawDocument<'_> {
        RawDocument::trusted(&self.bytes)
    }

    /// Returns the encoded bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the document, returning the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

fn append_json(builder: &mut DocumentBuilder, name: &str, value: &serde_json::Value) {
    match value {
        serde_json::Value::Null => {
            builder.append(name, &Value::Null);
        }
        serde_json::Value::Bool(b) => {
            builder.append(name, &Value::Bool(*b));
        }
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if let Ok(small) = i32::try_from(i) {
                    builder.append(name, &Value::Int32(small));
                } else {
                    builder.append(name, &Value::Int64(i));
                }
            } else {
                builder.append(name, &Value::Double(n.as_f64().unwrap_or(f64::NAN)));
            }
        }
        serde_json::Value::String(s) => {
            builder.append(name, &Value::String(s));
        }
        serde_json::Value::Array(items) => {
            let mut elements = DocumentBuilder::new();
            for (position, item) in items.iter().enumerate() {
                append_json(&mut elements, &position.to_string(), item);
            }
            let encoded = elements.finish();
            builder.append(name, &Value::Array(encoded.as_raw()));
        }
        serde_json::Value::Object(map) => {
            let mut nested = DocumentBuilder::new();
            for (field, item) in map {
                append_json(&mut nested, field, item);
            }
            let encoded = nested.finish();
            builder.append(name, &Value::Document(encoded.as_raw()));
        }
    }
}
