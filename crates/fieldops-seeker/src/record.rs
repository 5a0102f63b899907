//! Schema-less records.
//!
//! Rows fetched from the backing store arrive as JSON objects. Implementing
//! [`Seekable`] for [`serde_json::Value`] lets those rows run through the
//! pipeline without first being mapped onto a typed entity.

use crate::traits::{split_path, Seekable};
use crate::value::{Number, Value};

/// A record as delivered by the backing store: a JSON object.
pub type Record = serde_json::Map<String, serde_json::Value>;

fn json_to_value(json: &serde_json::Value) -> Value<'_> {
    match json {
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Bool(b) => Value::Bool(*b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(Number::I64(i))
            } else if let Some(u) = n.as_u64() {
                Value::Number(Number::U64(u))
            } else {
                n.as_f64()
                    .map(|f| Value::Number(Number::F64(f)))
                    .unwrap_or(Value::None)
            }
        }
        // Arrays and objects have no scalar value; null is missing data.
        _ => Value::None,
    }
}

impl Seekable for serde_json::Value {
    fn field_value(&self, field: &str) -> Value<'_> {
        match self {
            serde_json::Value::Object(map) => map.field_value(field),
            _ => Value::None,
        }
    }
}

impl Seekable for Record {
    fn field_value(&self, field: &str) -> Value<'_> {
        let (head, rest) = split_path(field);
        match (self.get(head), rest) {
            (Some(value), None) => json_to_value(value),
            (Some(value), Some(rest)) => value.field_value(rest),
            (None, _) => Value::None,
        }
    }
}
