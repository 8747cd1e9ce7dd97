//! Document identifier encoding for index entries.
//!
//! Index entries store the identity of the document they point at, and the
//! primary collection is keyed by the same bytes. ObjectId identities use
//! their raw 12 bytes; any other identity value is wrapped in a small
//! self-describing document so the type survives the round trip.

use crate::bson::{DecodeResult, DocumentBuilder, RawDocument, Value};

/// Field name used for wrapped non-ObjectId identities
const ID_FIELD: &str = "_id";

/// Raw ObjectId identities are exactly this long; wrapped documents are
/// always longer (framing alone is 5 bytes plus a tag and name).
const OBJECT_ID_LEN: usize = 12;

/// Encodes an identity value into its index/primary-key byte form
pub fn encode_doc_id(id: &Value<'_>) -> Vec<u8> {
    match id {
        Value::ObjectId(oid) => oid.bytes().to_vec(),
        other => {
            let mut builder = DocumentBuilder::new();
            builder.append(ID_FIELD, other);
            builder.finish().into_bytes()
        }
    }
}

/// Decodes identity bytes back into a value view.
///
/// The returned value borrows from `bytes` for non-ObjectId identities.
pub fn decode_doc_id(bytes: &[u8]) -> DecodeResult<Option<Value<'_>>> {
    if bytes.len() == OBJECT_ID_LEN {
        let mut raw = [0u8; OBJECT_ID_LEN];
        raw.copy_from_slice(bytes);
        return Ok(Some(Value::ObjectId(crate::bson::ObjectId::from_bytes(raw))));
    }
    RawDocument::new(bytes)?.get(ID_FIELD)
}
