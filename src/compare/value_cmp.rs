//! Total-order comparison of two decoded values.
//!
//! Implements the cross-type ordering the whole crate depends on: query
//! predicate evaluation, B-tree key ordering in the storage engine, and
//! sort semantics all go through this one function, so it must be a total
//! order (antisymmetric, transitive) for every valid value pair and must
//! never panic.
//!
//! Values of different precedence classes order by class alone:
//!
//! ```text
//! minKey < null < numbers < strings < object < array < binData
//!        < objectId < bool < date < timestamp < regex < maxKey
//! ```
//!
//! Numbers coerce across Int32/Int64/Double/Decimal128 per the safe-double
//! rule; pairs outside the exactly-representable range take a deterministic
//! fallback that is total but intentionally not float arithmetic.

use std::cmp::Ordering;

use crate::bson::Value;

use super::doc_cmp::compare_documents;

/// Magnitude bound for exact f64 representation of integers
const SAFE_DOUBLE_BOUND: f64 = 9_007_199_254_740_992.0; // 2^53

/// Same bound for testing an Int64 before conversion; the check must run
/// on the integer itself, since converting first rounds 2^53 + 1 down to
/// exactly 2^53 and would misclassify it as safe.
const SAFE_INTEGER_BOUND: u64 = 1 << 53;

/// Compares two values under the cross-type total order
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    let class_a = type_class(a);
    let class_b = type_class(b);
    if class_a != class_b {
        return class_a.cmp(&class_b);
    }
    compare_same_class(a, b)
}

/// Fixed precedence class per type
fn type_class(value: &Value<'_>) -> u8 {
    match value {
        Value::MinKey => 1,
        Value::Null => 2,
        Value::Int32(_) | Value::Int64(_) | Value::Double(_) | Value::Decimal128(_) => 3,
        Value::String(_) | Value::Symbol(_) => 4,
        Value::Document(_) => 5,
        Value::Array(_) => 6,
        Value::Binary { .. } => 7,
        Value::ObjectId(_) => 8,
        Value::Bool(_) => 9,
        Value::DateTime(_) => 10,
        Value::Timestamp { .. } => 11,
        Value::Regex { .. } => 12,
        Value::Unsupported(_) => 14,
        Value::MaxKey => 15,
    }
}

fn compare_same_class(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::MinKey, Value::MinKey)
        | (Value::MaxKey, Value::MaxKey)
        | (Value::Null, Value::Null) => Ordering::Equal,

        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),

        // Byte-wise with length tie-break, which is what slice Ord does.
        (Value::String(x) | Value::Symbol(x), Value::String(y) | Value::Symbol(y)) => {
            x.as_bytes().cmp(y.as_bytes())
        }

        (Value::ObjectId(x), Value::ObjectId(y)) => x.bytes().cmp(y.bytes()),

        (Value::DateTime(x), Value::DateTime(y)) => x.cmp(y),

        (
            Value::Timestamp {
                seconds: s1,
                increment: i1,
            },
            Value::Timestamp {
                seconds: s2,
                increment: i2,
            },
        ) => s1.cmp(s2).then(i1.cmp(i2)),

        // Documented BinData order: length dominates subtype and content.
        (
            Value::Binary {
                subtype: t1,
                bytes: b1,
            },
            Value::Binary {
                subtype: t2,
                bytes: b2,
            },
        ) => b1.len().cmp(&b2.len()).then(t1.cmp(t2)).then(b1.cmp(b2)),

        (Value::Document(x), Value::Document(y)) | (Value::Array(x), Value::Array(y)) => {
            compare_documents(*x, *y)
        }

        (
            Value::Regex {
                pattern: p1,
                options: o1,
            },
            Value::Regex {
                pattern: p2,
                options: o2,
            },
        ) => p1
            .as_bytes()
            .cmp(p2.as_bytes())
            .then(o1.as_bytes().cmp(o2.as_bytes())),

        _ if a.is_numeric() && b.is_numeric() => compare_numeric(a, b),

        // Same unrecognized class: keep the B-tree stable.
        _ => Ordering::Equal,
    }
}

/// Cross-type numeric comparison with the safe-double rule
fn compare_numeric(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    // Two fixed-width integers compare exactly, no precision loss.
    if let (Some(x), Some(y)) = (as_integer(a), as_integer(b)) {
        return x.cmp(&y);
    }
    match (safe_double(a), safe_double(b)) {
        // Both finite and exactly representable: double arithmetic is
        // exact here, and -0.0 == +0.0 falls out of the IEEE compare.
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => unsafe_numeric_fallback(a, b),
    }
}

fn as_integer(value: &Value<'_>) -> Option<i64> {
    match value {
        Value::Int32(v) => Some(i64::from(*v)),
        Value::Int64(v) => Some(*v),
        _ => None,
    }
}

/// Returns the value as an f64 when that conversion is exact
fn safe_double(value: &Value<'_>) -> Option<f64> {
    match value {
        Value::Int32(v) => Some(f64::from(*v)),
        Value::Int64(v) => (v.unsigned_abs() <= SAFE_INTEGER_BOUND).then(|| *v as f64),
        Value::Double(v) => (v.is_finite() && v.abs() <= SAFE_DOUBLE_BOUND).then_some(*v),
        _ => None,
    }
}

/// Deterministic order for pairs outside the safe-double range.
///
/// Different concrete types order by a fixed subtype rank; identical types
/// compare on their raw representation. This diverges from naive double
/// arithmetic for corner cases like a huge Int64 against a Decimal128, but
/// it is antisymmetric and transitive, which is what the B-tree needs.
fn unsafe_numeric_fallback(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    let rank_a = numeric_rank(a);
    let rank_b = numeric_rank(b);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }
    match (a, b) {
        (Value::Int32(x), Value::Int32(y)) => x.cmp(y),
        (Value::Int64(x), Value::Int64(y)) => x.cmp(y),
        (Value::Double(x), Value::Double(y)) => compare_doubles_total(*x, *y),
        (Value::Decimal128(x), Value::Decimal128(y)) => x.numeric_cmp(y),
        _ => Ordering::Equal,
    }
}

fn numeric_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Int32(_) => 0,
        Value::Int64(_) => 1,
        Value::Double(_) => 2,
        _ => 3,
    }
}

/// NaN is the minimum and equal to itself; everything else is IEEE order
fn compare_doubles_total(x: f64, y: f64) -> Ordering {
    match (x.is_nan(), y.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
    }
}
