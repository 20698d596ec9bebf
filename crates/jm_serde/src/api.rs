use jm_reflect::Value;
use jm_reflect::registry::ClassRegistry;

use crate::error::SerializerError;
use crate::options::{JsonSerializerOptions, NullishPolicy};
use crate::serializer::{DeserializeTarget, JsonSerializer};

/// Serializes `value` with the classes of [`ClassRegistry::global`].
///
/// `remove` is either the remove-undefined flag or a full [`NullishPolicy`].
/// Errors are logged.
///
/// # Examples
///
/// ```
/// use jm_reflect::{Instance, Value};
///
/// let point = Value::from(Instance::new().with("x", 1).with("y", Value::Undefined));
/// assert_eq!(jm_serde::serialize(&point, true).unwrap().render(), r#"{"x":1}"#);
/// ```
pub fn serialize(value: &Value, remove: impl Into<NullishPolicy>) -> Result<Value, SerializerError> {
    let options = JsonSerializerOptions::default().with_nullish_policy(remove);
    JsonSerializer::with_options(ClassRegistry::global().clone(), options).serialize(value)
}

/// Deserializes `value` into `target` with the classes of [`ClassRegistry::global`]
/// and default options.
#[inline]
pub fn deserialize(
    value: &Value,
    target: impl Into<DeserializeTarget>,
) -> Result<Value, SerializerError> {
    JsonSerializer::default().deserialize(value, target)
}
