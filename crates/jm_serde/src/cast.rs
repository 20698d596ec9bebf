use chrono::{DateTime, Utc};
use jm_reflect::Value;
use jm_reflect::value::date;

use crate::error::{Location, Operation, SerializerError};
use crate::serializer::JsonSerializer;

impl JsonSerializer {
    /// Coerces a scalar into the primitive kind `type_name` (`string`, `number`,
    /// `boolean` or `date`, case-insensitive).
    ///
    /// A value already of that kind, a missing type name and any other type
    /// name pass `value` through. A value that cannot be coerced is reported,
    /// naming `location`, and gives `Undefined`:
    ///
    /// - `string`: anything but sets, maps and objects;
    /// - `number`: anything that does not coerce to `NaN`;
    /// - `boolean`: nothing;
    /// - `date`: date strings and epoch milliseconds.
    ///
    /// # Examples
    ///
    /// ```
    /// use jm_reflect::Value;
    /// use jm_reflect::value::date;
    /// use jm_serde::{JsonSerializer, Location};
    ///
    /// let serializer = JsonSerializer::default();
    ///
    /// let birth_date = serializer
    ///     .cast_simple_data(Some("Date"), &Value::from("1994-04-01T22:00:00.000Z"), Location::unknown())
    ///     .unwrap();
    /// assert_eq!(birth_date.as_date().map(date::to_millis), Some(765_237_600_000.0));
    ///
    /// let id = serializer
    ///     .cast_simple_data(Some("Number"), &Value::from(" 42 "), Location::unknown())
    ///     .unwrap();
    /// assert_eq!(id, Value::from(42));
    /// ```
    pub fn cast_simple_data(
        &self,
        type_name: Option<&str>,
        value: &Value,
        location: Location,
    ) -> Result<Value, SerializerError> {
        let Some(type_name) = type_name else {
            return Ok(value.clone());
        };
        if value.is_kind(type_name) {
            return Ok(value.clone());
        }

        let type_name = type_name.to_ascii_lowercase();
        let cast = match type_name.as_str() {
            "string" => value.to_js_string().map(Value::String),
            "number" => Some(to_number(value)).filter(|n| !n.is_nan()).map(Value::Number),
            "boolean" => None,
            "date" => to_date(value).map(Value::Date),
            _ => Some(value.clone()),
        };

        match cast {
            Some(cast) => Ok(cast),
            None => {
                self.report(SerializerError::mismatch(
                    Operation::Deserialize,
                    value,
                    type_name,
                    location,
                ))?;
                Ok(Value::Undefined)
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Coercions

fn to_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(text) => date::parse_date(text),
        Value::Number(millis) => date::from_millis(*millis),
        _ => None,
    }
}

/// The number `value` coerces to, `NaN` when it does not.
fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::String(text) => parse_number(text),
        Value::Date(d) => date::to_millis(d),
        Value::Array(_) => value
            .to_js_string()
            .map_or(f64::NAN, |text| parse_number(&text)),
        Value::Set(_) | Value::Map(_) | Value::Object(_) => f64::NAN,
    }
}

/// Parses numeric text: decimal with optional exponent, `Infinity`, or a
/// `0x`/`0o`/`0b` integer. Blank text is `0`.
fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&text[2..], radix).map_or(f64::NAN, |n| n as f64);
    }

    let is_decimal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal {
        return f64::NAN;
    }
    text.parse::<f64>().unwrap_or(f64::NAN)
}

// -----------------------------------------------------------------------------
// Tests
