//! The accessor trait records implement to take part in list pipelines.

use crate::value::Value;

/// Trait for types whose fields can be searched, faceted and sorted.
///
/// Field names may be dot-separated paths (`"client.name"`); an
/// implementation resolves as much of the path as it understands and returns
/// [`Value::None`] for anything it cannot resolve.
///
/// # Example
///
/// ```
/// use fieldops_seeker::{Number, Seekable, Value};
///
/// struct Technician {
///     name: String,
///     hourly_rate: f64,
///     active: bool,
/// }
///
/// impl Seekable for Technician {
///     fn field_value(&self, field: &str) -> Value<'_> {
///         match field {
///             "name" => Value::String(&self.name),
///             "hourly_rate" => Value::Number(Number::F64(self.hourly_rate)),
///             "active" => Value::Bool(self.active),
///             _ => Value::None,
///         }
///     }
/// }
/// ```
pub trait Seekable {
    /// Returns the value of a field, or [`Value::None`] when the field is
    /// missing, null, or unknown.
    fn field_value(&self, field: &str) -> Value<'_>;

    /// Static accessor function, handy where a plain `fn` is expected.
    fn accessor<'a>(item: &'a Self, field: &str) -> Value<'a>
    where
        Self: Sized,
    {
        item.field_value(field)
    }
}

impl<T: Seekable + ?Sized> Seekable for &T {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

impl<T: Seekable + ?Sized> Seekable for Box<T> {
    fn field_value(&self, field: &str) -> Value<'_> {
        (**self).field_value(field)
    }
}

/// Splits a dot path into its first segment and the remainder.
///
/// ```
/// use fieldops_seeker::split_path;
///
/// assert_eq!(split_path("client.name"), ("client", Some("name")));
/// assert_eq!(split_path("status"), ("status", None));
/// ```
pub fn split_path(path: &str) -> (&str, Option<&str>) {
    match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    }
}
