use alloc::string::String;
use alloc::sync::Arc;

use jm_reflect::info::{FormatPropertyName, PropertyMetadata, TypeRef};
use jm_reflect::registry::ClassRegistry;
use jm_reflect::{Instance, Value};
use serde::Serialize;

use crate::error::{Operation, SerializerError};
use crate::options::{JsonSerializerOptions, Policy};

// -----------------------------------------------------------------------------
// DeserializeTarget

/// What to deserialize into: a type to instantiate, or an existing instance to fill.
#[derive(Clone, Debug, PartialEq)]
pub enum DeserializeTarget {
    Type(TypeRef),
    /// Fields the input does not provide keep their current value.
    Instance(Instance),
}

impl From<TypeRef> for DeserializeTarget {
    #[inline]
    fn from(value: TypeRef) -> Self {
        DeserializeTarget::Type(value)
    }
}

impl From<&str> for DeserializeTarget {
    /// A class, by name.
    #[inline]
    fn from(value: &str) -> Self {
        DeserializeTarget::Type(TypeRef::class(String::from(value)))
    }
}

impl From<Instance> for DeserializeTarget {
    #[inline]
    fn from(value: Instance) -> Self {
        DeserializeTarget::Instance(value)
    }
}

// -----------------------------------------------------------------------------
// JsonSerializer

/// Converts object graphs to JSON values and back, driven by the class
/// declarations of a [`ClassRegistry`].
///
/// Every entry point returns `Ok` unless the [error callback] aborts; errors
/// that are let through leave `Undefined` in place of the offending value.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use jm_reflect::info::{PropertyOptions, TypeRef};
/// use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
/// use jm_reflect::{Instance, Value};
/// use jm_serde::JsonSerializer;
///
/// let mut registry = ClassRegistry::new();
/// registry.register(
///     ClassDeclaration::new("Zoo")
///         .property("name", TypeRef::String)
///         .property_with("city", TypeRef::String, "location"),
/// );
/// let serializer = JsonSerializer::new(Arc::new(registry));
///
/// let zoo = Instance::of_class("Zoo")
///     .with("name", "The Greatest Zoo")
///     .with("city", "Bordeaux");
///
/// let json = serializer.serialize(&Value::from(zoo.clone())).unwrap();
/// assert_eq!(json.render(), r#"{"name":"The Greatest Zoo","location":"Bordeaux"}"#);
///
/// let back = serializer.deserialize(&json, "Zoo").unwrap();
/// assert_eq!(back, Value::from(zoo));
/// ```
///
/// [error callback]: crate::options::ErrorCallback
#[derive(Clone, Debug)]
pub struct JsonSerializer {
    registry: Arc<ClassRegistry>,
    /// May be changed between calls.
    pub options: JsonSerializerOptions,
}

impl Default for JsonSerializer {
    /// A serializer over [`ClassRegistry::global`] with default options.
    #[inline]
    fn default() -> Self {
        Self::new(ClassRegistry::global().clone())
    }
}

impl JsonSerializer {
    #[inline]
    pub fn new(registry: Arc<ClassRegistry>) -> Self {
        Self::with_options(registry, JsonSerializerOptions::default())
    }

    #[inline]
    pub fn with_options(registry: Arc<ClassRegistry>, options: JsonSerializerOptions) -> Self {
        Self { registry, options }
    }

    #[inline]
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    #[inline]
    pub fn options_mut(&mut self) -> &mut JsonSerializerOptions {
        &mut self.options
    }

    // -------------------------------------------------------------------------
    // Shared steps

    /// Hands `error` to the error callback.
    pub(crate) fn report(&self, error: SerializerError) -> Result<(), SerializerError> {
        match &self.options.error_callback {
            Some(callback) => callback.call(error),
            None => Ok(()),
        }
    }

    /// Whether `value` may be written under `name`, per the nullish policy and
    /// the declared default value.
    pub(crate) fn is_allowed_property(
        &self,
        name: &str,
        value: &Value,
        metadata: Option<&PropertyMetadata>,
    ) -> Result<bool, SerializerError> {
        match self.options.nullish_policy.policy_for(value) {
            Some(Policy::Disallow) => {
                self.report(SerializerError::DisallowedNullish {
                    value: value.clone(),
                    name: name.into(),
                })?;
                return Ok(false);
            }
            Some(Policy::Remove) => return Ok(false),
            Some(Policy::Allow) | None => {}
        }

        if let Some(default) = metadata.and_then(PropertyMetadata::default_value)
            && !default.is_nullish()
            && value == default
        {
            return Ok(false);
        }

        Ok(true)
    }

    /// Whether a nullish value left out of a collection should be kept.
    pub(crate) fn keeps_item(&self, value: &Value) -> bool {
        !matches!(
            self.options.nullish_policy.policy_for(value),
            Some(Policy::Remove)
        )
    }

    /// Reports a missing required property: `property` and the instance field
    /// `key` are both nullish.
    pub(crate) fn check_required_property<T: Serialize + ?Sized>(
        &self,
        operation: Operation,
        metadata: &PropertyMetadata,
        instance: &Instance,
        key: &str,
        property: &Value,
        received: &T,
    ) -> Result<(), SerializerError> {
        if metadata.is_required() && property.is_nullish() && instance.field(key).is_nullish() {
            self.report(SerializerError::RequiredProperty {
                operation,
                key: key.into(),
                class: instance.constructor_name().into(),
                received: render(received),
            })?;
        }
        Ok(())
    }

    /// The formatter applying to the names of `class`: its own, or its nearest
    /// ancestor's, or the serializer-wide one.
    pub(crate) fn name_formatter(&self, class: &str) -> Option<&FormatPropertyName> {
        core::iter::once(class)
            .chain(
                self.registry
                    .base_class_names(class)
                    .iter()
                    .rev()
                    .map(String::as_str),
            )
            .filter_map(|name| self.registry.get(name))
            .find_map(|metadata| metadata.options().format_property_name.as_ref())
            .or(self.options.format_property_name.as_ref())
    }
}

/// The external name of a single-named property.
pub(crate) fn external_name(
    formatter: Option<&FormatPropertyName>,
    metadata: &PropertyMetadata,
    name: &str,
) -> String {
    match formatter {
        Some(formatter) if !metadata.is_name_overridden() => formatter.call(name),
        _ => name.into(),
    }
}

/// JSON text of anything serializable, for messages.
pub(crate) fn render<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("undefined"))
}
