//! 128-bit decimal floating point (IEEE 754-2008, binary integer decimal).
//!
//! The raw 16 bytes are carried as-is through the wire format; they are only
//! decoded into (sign, exponent, coefficient) when a comparison or display
//! needs the numeric value. Decimal values are never representable as a
//! "safe" IEEE double, so they always take the deterministic comparison
//! path in the value comparator.

use std::cmp::Ordering;
use std::fmt;

/// Exponent bias for decimal128
const EXPONENT_BIAS: i32 = 6176;

/// Largest canonical coefficient: 10^34 - 1
const MAX_COEFFICIENT: u128 = 9_999_999_999_999_999_999_999_999_999_999_999;

/// A decimal128 value stored as its raw little-endian bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal128 {
    bytes: [u8; 16],
}

/// Decoded numeric class of a decimal128 value.
///
/// Non-canonical bit patterns (coefficient above 10^34 - 1) decode as a
/// zero coefficient, matching how MongoDB treats them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DecimalClass {
    NaN,
    NegativeInfinity,
    Finite {
        negative: bool,
        exponent: i32,
        coefficient: u128,
    },
    Infinity,
}

impl Decimal128 {
    /// Wraps raw little-endian decimal128 bytes
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    /// Builds a finite decimal from sign, base-10 exponent, and coefficient.
    ///
    /// The coefficient is clamped to the canonical maximum of 10^34 - 1.
    pub fn from_parts(negative: bool, exponent: i32, coefficient: u128) -> Self {
        let coefficient = coefficient.min(MAX_COEFFICIENT);
        let biased = (exponent + EXPONENT_BIAS) as u128;
        let mut bits = coefficient;
        bits |= biased << 113;
        if negative {
            bits |= 1u128 << 127;
        }
        Self {
            bytes: bits.to_le_bytes(),
        }
    }

    /// Returns the raw little-endian bytes
    pub fn bytes(&self) -> &[u8; 16] {
        &self.bytes
    }

    /// Returns true if the value is NaN
    pub fn is_nan(&self) -> bool {
        matches!(self.classify(), DecimalClass::NaN)
    }

    /// Decodes the bit pattern into its numeric class
    pub(crate) fn classify(&self) -> DecimalClass {
        let bits = u128::from_le_bytes(self.bytes);
        let negative = (bits >> 127) & 1 == 1;

        // Steering bits after the sign select the encoding form.
        if (bits >> 125) & 0b11 == 0b11 {
            // Special values: 11110 = infinity, 11111 = NaN.
            let special = (bits >> 122) & 0b11111;
            if special == 0b11111 {
                return DecimalClass::NaN;
            }
            if special == 0b11110 {
                return if negative {
                    DecimalClass::NegativeInfinity
                } else {
                    DecimalClass::Infinity
                };
            }
            // Large-coefficient form always exceeds 10^34 - 1: treat as zero.
            let exponent = ((bits >> 111) & 0x3fff) as i32 - EXPONENT_BIAS;
            return DecimalClass::Finite {
                negative,
                exponent,
                coefficient: 0,
            };
        }

        let exponent = ((bits >> 113) & 0x3fff) as i32 - EXPONENT_BIAS;
        let coefficient = bits & ((1u128 << 113) - 1);
        let coefficient = if coefficient > MAX_COEFFICIENT {
            0
        } else {
            coefficient
        };
        DecimalClass::Finite {
            negative,
            exponent,
            coefficient,
        }
    }

    /// Total order over decimal values.
    ///
    /// NaN is the minimum and equal to itself, then negative infinity, then
    /// finite values by numeric magnitude, then positive infinity. This is
    /// the order the value comparator relies on for its deterministic
    /// fallback, so it must never depend on float arithmetic.
    pub(crate) fn numeric_cmp(&self, other: &Decimal128) -> Ordering {
        use DecimalClass::*;
        match (self.classify(), other.classify()) {
            (NaN, NaN) => Ordering::Equal,
            (NaN, _) => Ordering::Less,
            (_, NaN) => Ordering::Greater,
            (NegativeInfinity, NegativeInfinity) => Ordering::Equal,
            (NegativeInfinity, _) => Ordering::Less,
            (_, NegativeInfinity) => Ordering::Greater,
            (Infinity, Infinity) => Ordering::Equal,
            (Infinity, _) => Ordering::Greater,
            (_, Infinity) => Ordering::Less,
            (
                Finite {
                    negative: n1,
                    exponent: e1,
                    coefficient: c1,
                },
                Finite {
                    negative: n2,
                    exponent: e2,
                    coefficient: c2,
                },
            ) => compare_finite(n1, e1, c1, n2, e2, c2),
        }
    }
}

/// Compares two finite decimals without widening arithmetic.
///
/// Zero compares equal regardless of sign or exponent. Otherwise the
/// adjusted exponent (digit count + exponent) decides magnitude, and equal
/// magnitudes fall back to a left-aligned digit-string comparison.
fn compare_finite(n1: bool, e1: i32, c1: u128, n2: bool, e2: i32, c2: u128) -> Ordering {
    if c1 == 0 && c2 == 0 {
        return Ordering::Equal;
    }
    if c1 == 0 {
        return if n2 { Ordering::Greater } else { Ordering::Less };
    }
    if c2 == 0 {
        return if n1 { Ordering::Less } else { Ordering::Greater };
    }
    if n1 != n2 {
        return if n1 { Ordering::Less } else { Ordering::Greater };
    }

    let d1 = c1.to_string();
    let d2 = c2.to_string();
    let adj1 = e1 + d1.len() as i32;
    let adj2 = e2 + d2.len() as i32;

    let magnitude = match adj1.cmp(&adj2) {
        Ordering::Equal => {
            // Same order of magnitude: compare digits left-aligned, padding
            // the shorter string with trailing zeros.
            let width = d1.len().max(d2.len());
            let p1 = format!("{:0<width$}", d1, width = width);
            let p2 = format!("{:0<width$}", d2, width = width);
            p1.cmp(&p2)
        }
        other => other,
    };

    if n1 {
        magnitude.reverse()
    } else {
        magnitude
    }
}

impl fmt::Display for Decimal128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.classify() {
            DecimalClass::NaN => write!(f, "NaN"),
            DecimalClass::Infinity => write!(f, "Infinity"),
            DecimalClass::NegativeInfinity => write!(f, "-Infinity"),
            DecimalClass::Finite {
                negative,
                exponent,
                coefficient,
            } => {
                if negative {
                    write!(f, "-")?;
                }
                let digits = coefficient.to_string();
                let adjusted = exponent + digits.len() as i32 - 1;
                if exponent > 0 || adjusted < -6 {
                    // Scientific notation
                    write!(f, "{}", &digits[..1])?;
                    if digits.len() > 1 {
                        write!(f, ".{}", &digits[1..])?;
                    }
                    write!(f, "E{}{}", if adjusted < 0 { "-" } else { "+" }, adjusted.abs())
                } else if exponent == 0 {
                    write!(f, "{}", digits)
                } else {
                    let point = digits.len() as i32 + exponent;
                    if point > 0 {
                        let point = point as usize;
                        write!(f, "{}.{}", &digits[..point], &digits[point..])
                    } else {
                        write!(f, "0.{}{}", "0".repeat(point.unsigned_abs() as usize), digits)
                    }
                }
            }
        }
    }
}
