use std::cmp::Ordering;
use std::fmt;
use std::num::IntErrorKind;

use num_traits::{CheckedAdd, CheckedMul, CheckedSub, ToPrimitive, Zero};

use crate::error::{Error, Result};

// ============================================================================
// Numeric Type System
// ============================================================================

/// Numbers are either exact 64-bit integers or IEEE 754 doubles.
/// Mixed operations promote to float.
#[derive(Debug, Clone, Copy)]
pub enum NumericType {
    Int(i64),
    Float(f64),
}

// ============================================================================
// Display Implementation
// ============================================================================

impl fmt::Display for NumericType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NumericType::Int(n) => write!(f, "{n}"),
            // Debug keeps the fractional part (`2.0`), so floats re-read as floats
            NumericType::Float(x) => write!(f, "{x:?}"),
        }
    }
}

// ============================================================================
// Equality and Comparison
// ============================================================================

impl PartialEq for NumericType {
    fn eq(&self, other: &Self) -> bool {
        use NumericType::*;

        match (self, other) {
            (Int(a), Int(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Int(a), Float(b)) => int_to_float(*a) == *b,
            (Float(a), Int(b)) => *a == int_to_float(*b),
        }
    }
}

impl PartialOrd for NumericType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        use NumericType::*;

        match (self, other) {
            (Int(a), Int(b)) => a.partial_cmp(b),
            (Float(a), Float(b)) => a.partial_cmp(b),
            (Int(a), Float(b)) => int_to_float(*a).partial_cmp(b),
            (Float(a), Int(b)) => a.partial_cmp(&int_to_float(*b)),
        }
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

fn int_to_float(n: i64) -> f64 {
    // i64 -> f64 is always representable (possibly rounded)
    n.to_f64().unwrap_or(f64::NAN)
}

fn checked<F>(op_name: &str, a: i64, b: i64, op: F) -> Result<NumericType>
where
    F: Fn(&i64, &i64) -> Option<i64>,
{
    op(&a, &b)
        .map(NumericType::Int)
        .ok_or_else(|| Error::Arithmetic(format!("{op_name}: integer overflow")))
}

impl NumericType {
    /// Convert to float (may lose precision)
    pub fn to_float(&self) -> f64 {
        match self {
            NumericType::Int(n) => int_to_float(*n),
            NumericType::Float(x) => *x,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            NumericType::Int(n) => n.is_zero(),
            NumericType::Float(x) => x.is_zero(),
        }
    }

    /// Read a token as a number: integer first, then float.
    /// Ok(None) means the token is not numeric. An integer literal outside
    /// the i64 range is an error rather than a rounded float.
    pub fn parse(text: &str) -> Result<Option<NumericType>> {
        match text.parse::<i64>() {
            Ok(n) => return Ok(Some(NumericType::Int(n))),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                return Err(Error::Arithmetic(format!(
                    "integer literal out of range: {text}"
                )));
            }
            Err(_) => {}
        }
        Ok(text.parse::<f64>().ok().map(NumericType::Float))
    }
}

// ============================================================================
// Arithmetic Operations
// ============================================================================

impl NumericType {
    pub fn add(&self, other: &NumericType) -> Result<NumericType> {
        match (self, other) {
            (NumericType::Int(a), NumericType::Int(b)) => {
                checked("+", *a, *b, CheckedAdd::checked_add)
            }
            _ => Ok(NumericType::Float(self.to_float() + other.to_float())),
        }
    }

    pub fn sub(&self, other: &NumericType) -> Result<NumericType> {
        match (self, other) {
            (NumericType::Int(a), NumericType::Int(b)) => {
                checked("-", *a, *b, CheckedSub::checked_sub)
            }
            _ => Ok(NumericType::Float(self.to_float() - other.to_float())),
        }
    }

    pub fn mul(&self, other: &NumericType) -> Result<NumericType> {
        match (self, other) {
            (NumericType::Int(a), NumericType::Int(b)) => {
                checked("*", *a, *b, CheckedMul::checked_mul)
            }
            _ => Ok(NumericType::Float(self.to_float() * other.to_float())),
        }
    }

    /// True division: the quotient is always a float
    pub fn div(&self, other: &NumericType) -> Result<NumericType> {
        if other.is_zero() {
            return Err(Error::Arithmetic("division by zero".to_string()));
        }
        Ok(NumericType::Float(self.to_float() / other.to_float()))
    }

    pub fn neg(&self) -> Result<NumericType> {
        match self {
            NumericType::Int(n) => n
                .checked_neg()
                .map(NumericType::Int)
                .ok_or_else(|| Error::Arithmetic("-: integer overflow".to_string())),
            NumericType::Float(x) => Ok(NumericType::Float(-x)),
        }
    }
}
