//! Decode error types for the document wire format.
//!
//! Decoding never recovers partially: the first malformed byte aborts the
//! walk and the error is propagated unchanged to the caller.

use thiserror::Error;

/// Result type for decode operations
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors produced while walking or validating encoded documents
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer ended before the element payload did
    #[error("document truncated at offset {offset}: need {needed} more bytes")]
    Truncated { offset: usize, needed: usize },

    /// The declared document length disagrees with the buffer
    #[error("declared document length {declared} does not fit buffer of {actual} bytes")]
    LengthMismatch { declared: usize, actual: usize },

    /// The document is missing its trailing NUL terminator
    #[error("missing document terminator byte")]
    MissingTerminator,

    /// A field name was not valid UTF-8
    #[error("field name at offset {0} is not valid UTF-8")]
    InvalidFieldName(usize),

    /// A string payload was not valid UTF-8
    #[error("string value for field {0:?} is not valid UTF-8")]
    InvalidUtf8(String),

    /// A string carried a non-positive or out-of-bounds length prefix
    #[error("invalid string length {0}")]
    InvalidStringLength(i32),

    /// A nested document or array carried an invalid length prefix
    #[error("invalid nested document length {0}")]
    InvalidNestedLength(i32),
}
