//! Totally ordered field values for range queries
//!
//! Ordering across kinds is fixed: Bool < numbers < Date < Text.
//! Integers and floats are one numeric kind and compare by value, so a
//! salary range can be expressed with either `from_int` or `from_float`.

use std::cmp::Ordering;

use chrono::NaiveDate;

/// A scalar value extracted from a record field.
#[derive(Debug, Clone)]
pub enum FieldValue {
    /// Boolean value (false < true)
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Float value; `-0.0 == 0.0`, NaN sorts beyond the infinities
    Float(f64),
    /// Calendar date
    Date(NaiveDate),
    /// String value
    Text(String),
}

impl FieldValue {
    /// Create a value from a boolean
    pub fn from_bool(v: bool) -> Self {
        FieldValue::Bool(v)
    }

    /// Create a value from an integer
    pub fn from_int(v: i64) -> Self {
        FieldValue::Int(v)
    }

    /// Create a value from a float
    pub fn from_float(v: f64) -> Self {
        FieldValue::Float(v)
    }

    /// Create a value from a date
    pub fn from_date(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }

    /// Create a value from a string
    pub fn from_text(v: impl Into<String>) -> Self {
        FieldValue::Text(v.into())
    }

    /// Create a value from a JSON value.
    ///
    /// Arrays, objects and null have no scalar value.
    pub fn from_json(value: &serde_json::Value) -> Option<Self> {
        match value {
            serde_json::Value::Bool(b) => Some(FieldValue::from_bool(*b)),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(FieldValue::from_int(i))
                } else {
                    n.as_f64().map(FieldValue::from_float)
                }
            }
            serde_json::Value::String(s) => Some(FieldValue::from_text(s.as_str())),
            _ => None,
        }
    }

    /// Numeric view of the value, if it is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Int(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Int(_) | FieldValue::Float(_) => 1,
            FieldValue::Date(_) => 2,
            FieldValue::Text(_) => 3,
        }
    }

    /// Whether `self` lies in `[min, max]` inclusive
    pub fn within(&self, min: &FieldValue, max: &FieldValue) -> bool {
        self >= min && self <= max
    }
}

impl Ord for FieldValue {
    fn cmp(&self, other: &Self) -> Ordering {
        use FieldValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => cmp_floats(*a, *b),
            (Int(a), Float(b)) => cmp_int_float(*a, *b),
            (Float(a), Int(b)) => cmp_int_float(*b, *a).reverse(),
            (Date(a), Date(b)) => a.cmp(b),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

/// Numeric order with `-0.0 == 0.0`. NaN has no numeric position and falls
/// back to `f64::total_cmp`, which places it beyond the infinities.
fn cmp_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Exact integer/float comparison.
///
/// Casting the integer to `f64` rounds above 2^53 and would make distinct
/// integers equal to the same float. Instead the float is split into its
/// integral part, which always fits in an `i64` inside the checked range,
/// and its fractional remainder.
fn cmp_int_float(i: i64, f: f64) -> Ordering {
    // 2^63, the first float above i64::MAX
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    if f.is_nan() {
        return if f.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }

    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => cmp_floats(whole, f),
        unequal => unequal,
    }
}

impl PartialOrd for FieldValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FieldValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FieldValue {}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(v: NaiveDate) -> Self {
        FieldValue::Date(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}
