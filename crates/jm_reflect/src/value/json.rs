use alloc::string::String;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::value::{Instance, Value, date};

// -----------------------------------------------------------------------------
// Rendering

impl Value {
    /// Renders this value as JSON text, the way `JSON.stringify` does:
    ///
    /// - object fields holding `Undefined` are dropped, array slots holding it become `null`;
    /// - dates become ISO-8601 strings, sets become arrays, maps become objects;
    /// - integral numbers carry no fraction, non-finite numbers become `null`;
    /// - a top-level `Undefined` renders as `undefined`.
    ///
    /// This is the text used in diagnostics.
    pub fn render(&self) -> String {
        if self.is_undefined() {
            return String::from("undefined");
        }
        serde_json::to_string(self).unwrap_or_else(|_| String::from("null"))
    }

    /// Parses JSON text.
    #[inline]
    pub fn from_json_str(text: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str::<serde_json::Value>(text).map(Value::from)
    }
}

/// Parses `value` as JSON text when it is a string holding an object, an array
/// or `null`. Anything else, including unparsable text, is returned unchanged.
///
/// # Examples
///
/// ```
/// use jm_reflect::value::try_parse;
/// use jm_reflect::Value;
///
/// assert!(try_parse(Value::from(r#"{"id":1}"#)).is_object());
/// assert_eq!(try_parse(Value::from("4")), Value::from("4"));
/// assert_eq!(try_parse(Value::from("{")), Value::from("{"));
/// ```
pub fn try_parse(value: Value) -> Value {
    let Value::String(text) = &value else {
        return value;
    };
    match Value::from_json_str(text) {
        Ok(parsed) if parsed.type_of() == "object" => parsed,
        _ => value,
    }
}

// -----------------------------------------------------------------------------
// Serialize

struct Number(f64);

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let n = self.0;
        if !n.is_finite() {
            serializer.serialize_unit()
        } else if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
            serializer.serialize_i64(n as i64)
        } else {
            serializer.serialize_f64(n)
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => Number(*n).serialize(serializer),
            Value::String(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&date::to_iso_string(d)),
            Value::Array(items) | Value::Set(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(None)?;
                for (key, value) in entries {
                    if value.is_undefined() {
                        continue;
                    }
                    let key = key.to_js_string().unwrap_or_else(|| key.render());
                    map.serialize_entry(&key, value)?;
                }
                map.end()
            }
            Value::Object(instance) => instance.serialize(serializer),
        }
    }
}

impl Serialize for Instance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.iter() {
            if !value.is_undefined() {
                map.serialize_entry(key, value)?;
            }
        }
        map.end()
    }
}

// -----------------------------------------------------------------------------
// serde_json interop

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(fields) => Value::Object(
                fields
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

// -----------------------------------------------------------------------------
// Tests
