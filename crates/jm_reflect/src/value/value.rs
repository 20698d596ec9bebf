use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use chrono::{DateTime, Utc};

use crate::value::{Instance, date};

// -----------------------------------------------------------------------------
// Value

pub(crate) static UNDEFINED: Value = Value::Undefined;

/// A node of the object graph.
///
/// # Examples
///
/// ```
/// use jm_reflect::{Instance, Value};
///
/// let zoo = Instance::of_class("Zoo")
///     .with("name", "The Greatest Zoo")
///     .with("isOpen", true);
///
/// let value = Value::from(zoo);
/// assert_eq!(value.class_name(), Some("Zoo"));
/// assert_eq!(value.render(), r#"{"name":"The Greatest Zoo","isOpen":true}"#);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// An absent value. Dropped from objects when rendered.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<Value>),
    /// An insertion-ordered set; [`Value::set_from`] removes repeated primitives.
    Set(Vec<Value>),
    /// An insertion-ordered map with arbitrary keys.
    Map(Vec<(Value, Value)>),
    Object(Instance),
}

impl Value {
    /// Builds a [`Value::Set`], dropping repeated items.
    ///
    /// Items are compared with [`Value::same_value_zero`]: reference values
    /// (objects, dates, arrays, sets and maps) are distinct items even when
    /// they hold equal data.
    pub fn set_from(items: impl IntoIterator<Item = Value>) -> Self {
        let mut set: Vec<Value> = Vec::new();
        for item in items {
            if !set.iter().any(|other| other.same_value_zero(&item)) {
                set.push(item);
            }
        }
        Value::Set(set)
    }

    /// Builds a [`Value::Map`]; a repeated key overwrites the earlier entry in place.
    ///
    /// Keys are compared like [`Value::set_from`] items.
    pub fn map_from(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            match map.iter_mut().find(|(k, _)| k.same_value_zero(&key)) {
                Some(entry) => entry.1 = value,
                None => map.push((key, value)),
            }
        }
        Value::Map(map)
    }

    /// The key equality of JavaScript sets and maps.
    ///
    /// Primitives are equal by value, with `NaN` equal to itself. Reference
    /// values never are, since two of them are always different nodes.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }

    #[inline]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// `true` for `Undefined` and `Null`.
    #[inline]
    pub const fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// `true` for every non-null, non-array reference value: objects, dates, sets and maps.
    #[inline]
    pub const fn is_object(&self) -> bool {
        matches!(
            self,
            Value::Object(_) | Value::Date(_) | Value::Set(_) | Value::Map(_)
        )
    }

    #[inline]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// The name `typeof` would report for this value.
    pub const fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Null
            | Value::Date(_)
            | Value::Array(_)
            | Value::Set(_)
            | Value::Map(_)
            | Value::Object(_) => "object",
        }
    }

    /// Whether this value is of the primitive kind `kind` (`"string"`, `"number"`,
    /// `"boolean"`, `"date"`, `"object"`, …), compared case-insensitively.
    pub fn is_kind(&self, kind: &str) -> bool {
        if kind.eq_ignore_ascii_case("date") {
            return matches!(self, Value::Date(_));
        }
        kind.eq_ignore_ascii_case(self.type_of())
    }

    /// The class of the instance, if this is an object of a declared class.
    #[inline]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            Value::Object(instance) => instance.class_name(),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_object_mut(&mut self) -> Option<&mut Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Items of an array or a set.
    #[inline]
    pub fn as_items(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) | Value::Set(items) => Some(items),
            _ => None,
        }
    }

    /// Reads `key` of an object; anything else, or a missing key, reads `Undefined`.
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Value::Object(instance) => instance.field(key),
            _ => &UNDEFINED,
        }
    }

    /// The string form `String(value)` would produce, or `None` for values
    /// without a meaningful one (plain objects and instances).
    pub fn to_js_string(&self) -> Option<String> {
        match self {
            Value::Undefined => Some("undefined".into()),
            Value::Null => Some("null".into()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(format_number(*n)),
            Value::String(s) => Some(s.clone()),
            Value::Date(d) => Some(date::to_iso_string(d)),
            Value::Array(items) => {
                let mut parts = Vec::with_capacity(items.len());
                for item in items {
                    parts.push(match item {
                        Value::Undefined | Value::Null => String::new(),
                        other => other.to_js_string()?,
                    });
                }
                Some(parts.join(","))
            }
            Value::Set(_) | Value::Map(_) | Value::Object(_) => None,
        }
    }
}

/// Formats a number the way JavaScript prints it: integral values carry no
/// fraction, and magnitudes from `1e21` up or below `1e-6` use exponent form.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".into()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity".into() } else { "-Infinity".into() }
    } else if n != 0.0 && (n.abs() >= 1e21 || n.abs() < 1e-6) {
        let formatted = format!("{n:e}");
        match formatted.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{mantissa}e+{exponent}")
            }
            _ => formatted,
        }
    } else if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        (n as i64).to_string()
    } else {
        n.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Number(f64::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, u8, u16, u32, f32, f64);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.into())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<DateTime<Utc>> for Value {
    #[inline]
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<Instance> for Value {
    #[inline]
    fn from(value: Instance) -> Self {
        Value::Object(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

// -----------------------------------------------------------------------------
// Tests
