//! Sort specification and the record comparator.
//!
//! Missing data sinks to the bottom: null values come after every defined
//! value regardless of direction. Direction only reverses the comparison of
//! two defined values.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SeekerError;
use crate::traits::Seekable;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    /// Descending order (largest first).
    #[serde(alias = "descending")]
    Desc,
}

impl Dir {
    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// The other direction.
    pub fn flipped(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dir {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Dir::Asc),
            "desc" | "descending" => Ok(Dir::Desc),
            other => Err(SeekerError::InvalidDirection(other.to_string())),
        }
    }
}

/// Which field to sort by, and in which direction.
///
/// A spec without a field leaves records in their input order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field (or dot path) to sort by.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Sort direction.
    #[serde(default)]
    pub dir: Dir,
}

impl SortSpec {
    /// A spec that does not sort.
    pub fn none() -> Self {
        SortSpec::default()
    }

    /// Creates a spec for the given field and direction.
    pub fn new(field: impl Into<String>, dir: Dir) -> Self {
        SortSpec {
            field: Some(field.into()),
            dir,
        }
    }

    /// Ascending spec for the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Asc)
    }

    /// Descending spec for the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        SortSpec::new(field, Dir::Desc)
    }

    /// The active sort field, treating an empty name as unset.
    pub fn active_field(&self) -> Option<&str> {
        self.field.as_deref().filter(|f| !f.trim().is_empty())
    }

    /// Compares two records under this spec.
    pub fn compare<T: Seekable + ?Sized>(&self, a: &T, b: &T) -> Ordering {
        match self.active_field() {
            Some(field) => compare_directed(&a.field_value(field), &b.field_value(field), self.dir),
            None => Ordering::Equal,
        }
    }
}

/// Parses `field`, `field:asc` or `field:desc`.
impl FromStr for SortSpec {
    type Err = SeekerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(SortSpec::none());
        }
        match s.rsplit_once(':') {
            Some((field, dir)) => Ok(SortSpec::new(field.trim(), dir.parse()?)),
            None => Ok(SortSpec::asc(s)),
        }
    }
}

impl std::fmt::Display for SortSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.active_field() {
            Some(field) => write!(f, "{}:{}", field, self.dir),
            None => write!(f, "unsorted"),
        }
    }
}

/// Rank of a value's type, used when two values of different types meet.
fn type_rank(value: &Value<'_>) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::Timestamp(_) => 1,
        Value::String(_) => 2,
        Value::Bool(_) => 3,
        Value::None => 4,
    }
}

fn compare_strings(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Compares two defined values, detecting their types per pair.
///
/// Same-type pairs compare naturally (strings case-insensitively). Pairs of
/// different types fall back to a fixed type rank so the comparator stays a
/// total order over loosely typed data.
pub fn compare_values(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a, b) {
        (Value::String(a), Value::String(b)) => compare_strings(a, b),
        (Value::Number(a), Value::Number(b)) => a.compare(*b).unwrap_or(Ordering::Equal),
        (Value::Timestamp(a), Value::Timestamp(b)) => a.cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

/// Compares two field values with nulls last in both directions.
pub fn compare_directed(a: &Value<'_>, b: &Value<'_>, dir: Dir) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => dir.apply(compare_values(a, b)),
    }
}

/// Sorts records by `sort`.
///
/// The sort is stable, and with no sort field the input order is returned
/// untouched.
pub fn apply_sort<'a, T: Seekable + ?Sized>(records: Vec<&'a T>, sort: &SortSpec) -> Vec<&'a T> {
    let mut records = records;
    if sort.active_field().is_some() {
        records.sort_by(|a, b| sort.compare(*a, *b));
    }
    records
}
