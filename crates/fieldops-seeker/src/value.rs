//! Runtime value types for field access.
//!
//! The [`Value`] enum is what a record hands to the pipeline when asked for a
//! field. It covers every shape a list column can hold: strings, numbers,
//! dates, booleans, and the absent value.

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};

/// Runtime value of a record field, borrowed from the record.
///
/// # Example
///
/// ```
/// use fieldops_seeker::{Number, Value};
///
/// struct Material {
///     name: String,
///     on_hand: u32,
/// }
///
/// fn accessor<'a>(m: &'a Material, field: &str) -> Value<'a> {
///     match field {
///         "name" => Value::String(&m.name),
///         "on_hand" => Value::Number(Number::U64(m.on_hand as u64)),
///         _ => Value::None,
///     }
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Date or date-time value.
    Timestamp(Timestamp),
    /// Boolean value.
    Bool(bool),
    /// Field not present, null, or not resolvable.
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` for values the pipeline treats as missing data.
    ///
    /// Besides `None` this includes a NaN number, which has no position in
    /// a numeric ordering.
    pub fn is_null(&self) -> bool {
        match self {
            Value::None => true,
            Value::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the timestamp value, if present.
    pub fn as_timestamp(&self) -> Option<Timestamp> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// String form used for facet membership.
    ///
    /// Strings are returned as-is, booleans become `"true"`/`"false"` and
    /// numbers use [`Number::display`]. Timestamps and missing values have no
    /// facet form.
    pub fn facet_form(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
            Value::Number(n) if !n.is_nan() => Some(Cow::Owned(n.display())),
            _ => None,
        }
    }

    /// Text that free-text search is matched against.
    ///
    /// Only strings and numbers are searchable.
    pub fn search_form(&self) -> Option<Cow<'a, str>> {
        match self {
            Value::String(s) => Some(Cow::Borrowed(*s)),
            Value::Number(n) if !n.is_nan() => Some(Cow::Owned(n.display())),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(s)
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::None)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Number> for Value<'_> {
    fn from(n: Number) -> Self {
        Value::Number(n)
    }
}

impl From<Timestamp> for Value<'_> {
    fn from(t: Timestamp) -> Self {
        Value::Timestamp(t)
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers keep their original representation, and every comparison is
/// exact: integers of different signedness compare as `i128`, and an
/// integer against a float compares the float's integral part first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Returns `true` for a floating point NaN.
    pub fn is_nan(self) -> bool {
        matches!(self, Number::F64(n) if n.is_nan())
    }

    fn to_i128(self) -> Option<i128> {
        match self {
            Number::I64(n) => Some(i128::from(n)),
            Number::U64(n) => Some(i128::from(n)),
            Number::F64(_) => None,
        }
    }

    /// Compares two numbers, handling mixed types.
    ///
    /// Returns `None` only when a NaN is involved.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::F64(a), _) => other
                .to_i128()
                .and_then(|b| compare_int_float(b, a))
                .map(Ordering::reverse),
            (_, Number::F64(b)) => self.to_i128().and_then(|a| compare_int_float(a, b)),
            _ => Some(self.to_i128().cmp(&other.to_i128())),
        }
    }

    /// Human form of the number: integral floats print without a fraction,
    /// so `42.0` and `42` both read `"42"`.
    pub fn display(self) -> String {
        match self {
            Number::I64(n) => n.to_string(),
            Number::U64(n) => n.to_string(),
            Number::F64(n) if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 => {
                format!("{}", n as i64)
            }
            Number::F64(n) => n.to_string(),
        }
    }
}

/// Exact comparison of an integer in the `i64`/`u64` range with a float.
fn compare_int_float(int: i128, float: f64) -> Option<Ordering> {
    const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;
    const MINUS_TWO_POW_63: f64 = -9_223_372_036_854_775_808.0;

    if float.is_nan() {
        return None;
    }
    let whole = float.trunc();
    if whole >= TWO_POW_64 {
        return Some(Ordering::Less);
    }
    if whole < MINUS_TWO_POW_63 {
        return Some(Ordering::Greater);
    }
    // In range, so the cast is exact.
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => 0.0_f64.partial_cmp(&(float - whole)),
        unequal => Some(unequal),
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

impl From<i32> for Number {
    fn from(n: i32) -> Self {
        Number::I64(n as i64)
    }
}

impl From<i64> for Number {
    fn from(n: i64) -> Self {
        Number::I64(n)
    }
}

impl From<u32> for Number {
    fn from(n: u32) -> Self {
        Number::U64(n as u64)
    }
}

impl From<u64> for Number {
    fn from(n: u64) -> Self {
        Number::U64(n)
    }
}

impl From<usize> for Number {
    fn from(n: usize) -> Self {
        Number::U64(n as u64)
    }
}

impl From<f64> for Number {
    fn from(n: f64) -> Self {
        Number::F64(n)
    }
}

/// Point in time as milliseconds since the Unix epoch.
///
/// Calendar dates map to midnight UTC, so a date and a date-time on the same
/// day are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<&DateTime<Utc>> for Timestamp {
    fn from(dt: &DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_millis())
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp(date.and_time(chrono::NaiveTime::MIN).and_utc().timestamp_millis())
    }
}
