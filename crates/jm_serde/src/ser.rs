//! Object graph to JSON.

use alloc::string::String;
use alloc::vec::Vec;

use jm_reflect::info::{PropertyMetadata, PropertyName, TypeRef};
use jm_reflect::registry::DISCRIMINATOR_KEY;
use jm_reflect::value::date;
use jm_reflect::{Instance, Value};

use crate::error::{Location, Operation, SerializerError};
use crate::options::Policy;
use crate::serializer::{JsonSerializer, external_name, render};
use crate::structure::{Shape, resolve_shape};

type Result<T> = core::result::Result<T, SerializerError>;

impl JsonSerializer {
    /// Serializes an instance, or an array of instances.
    ///
    /// Anything else is reported and gives `Undefined`.
    pub fn serialize(&self, value: &Value) -> Result<Value> {
        if value.is_array() {
            return self.serialize_object_array(value);
        }
        if value.is_object() {
            return self.serialize_object(value);
        }

        self.report(SerializerError::NotArrayNorObject {
            operation: Operation::Serialize,
            received: value.render(),
        })?;
        Ok(Value::Undefined)
    }

    /// Serializes a single instance into a plain JSON object.
    ///
    /// Nullish values are returned as is, reported first if their policy is
    /// [`Policy::Disallow`]. Instances of classes without properties are
    /// returned unchanged.
    pub fn serialize_object(&self, value: &Value) -> Result<Value> {
        if value.is_nullish() {
            self.check_nullish(Operation::Serialize, value, "Object")?;
            return Ok(value.clone());
        }

        let Value::Object(instance) = value else {
            return self.serialize_untracked(value);
        };
        let Some(class) = instance.class_name() else {
            return Ok(value.clone());
        };
        let Some(properties) = self.registry().merged_properties(class) else {
            return Ok(value.clone());
        };

        let formatter = self.name_formatter(class);
        let mut json = Instance::new();

        if self.registry().uses_auto_predicate(class) {
            json.set(DISCRIMINATOR_KEY, class.to_owned());
        }

        for (key, metadata) in &properties {
            let property = match instance.get(key) {
                Some(field) => {
                    let field = match metadata.before_serialize() {
                        Some(hook) => hook.call(field.clone(), instance),
                        None => field.clone(),
                    };
                    let declared = self.registry().field_type(class, key);
                    let property = self.serialize_property(&field, declared, metadata)?;
                    match metadata.after_serialize() {
                        Some(hook) => hook.call(property, instance),
                        None => property,
                    }
                }
                None => Value::Undefined,
            };

            match metadata.name() {
                PropertyName::Multiple(names) => {
                    if !property.is_nullish() && property.as_object().is_none() {
                        self.report(SerializerError::mismatch(
                            Operation::Serialize,
                            &property,
                            "Object",
                            Location::property(key.as_str(), class),
                        ))?;
                    }
                    for name in names {
                        let slot = property.get(name);
                        if self.is_allowed_property(name, slot, None)? {
                            json.set(name.as_str(), slot.clone());
                        }
                    }
                }
                PropertyName::Single(name) => {
                    self.check_required_property(
                        Operation::Serialize,
                        metadata,
                        instance,
                        key,
                        &property,
                        instance,
                    )?;
                    if self.is_allowed_property(key, &property, Some(metadata))? {
                        json.set(external_name(formatter, metadata, name), property);
                    }
                }
            }
        }

        if self.options.additional_properties_policy == Policy::Remove {
            return Ok(Value::Object(json));
        }

        let additional: Vec<&String> = instance
            .keys()
            .filter(|key| !properties.contains_key(key.as_str()))
            .collect();
        if additional.is_empty() {
            return Ok(Value::Object(json));
        }

        match self.options.additional_properties_policy {
            Policy::Disallow => self.report(SerializerError::AdditionalProperties {
                received: render(instance),
                properties: additional.into_iter().cloned().collect(),
            })?,
            Policy::Allow => {
                for key in additional {
                    json.set(key.as_str(), instance.field(key).clone());
                }
            }
            Policy::Remove => {}
        }

        Ok(Value::Object(json))
    }

    /// Serializes every instance of an array.
    ///
    /// Items serializing to a nullish value are dropped when their policy is
    /// [`Policy::Remove`].
    pub fn serialize_object_array(&self, value: &Value) -> Result<Value> {
        if value.is_nullish() {
            self.check_nullish(Operation::Serialize, value, "Array")?;
            return Ok(value.clone());
        }

        let Value::Array(items) = value else {
            self.report(SerializerError::mismatch(
                Operation::Serialize,
                value,
                "Array",
                Location::unknown(),
            ))?;
            return Ok(Value::Undefined);
        };

        let mut array = Vec::with_capacity(items.len());
        for item in items {
            let item = self.serialize_object(item)?;
            if self.keeps_item(&item) {
                array.push(item);
            }
        }
        Ok(Value::Array(array))
    }

    // -------------------------------------------------------------------------
    // Properties

    fn serialize_property(
        &self,
        value: &Value,
        declared: Option<&TypeRef>,
        metadata: &PropertyMetadata,
    ) -> Result<Value> {
        let element = metadata.ty().or(declared);
        let is_tracked = element.is_some_and(|ty| self.registry().is_tracked(ty));

        if !value.is_truthy() || !(is_tracked || metadata.predicate().is_some()) {
            return self.serialize_untracked(value);
        }

        match resolve_shape(declared, value, metadata) {
            Shape::Array | Shape::Set => match value {
                Value::Set(items) => self.serialize_object_array(&Value::Array(items.clone())),
                _ => self.serialize_object_array(value),
            },
            Shape::Dictionary => self.serialize_dictionary(value),
            Shape::Map => match value {
                Value::Map(entries) => {
                    let dictionary = self.string_keyed(entries)?;
                    self.serialize_dictionary(&Value::Object(dictionary))
                }
                _ => self.serialize_dictionary(value),
            },
            Shape::Plain => self.serialize_object(value),
        }
    }

    /// Serializes every value of a plain object.
    fn serialize_dictionary(&self, value: &Value) -> Result<Value> {
        let Value::Object(dictionary) = value else {
            self.report(SerializerError::mismatch(
                Operation::Serialize,
                value,
                "Dictionary",
                Location::unknown(),
            ))?;
            return Ok(Value::Undefined);
        };

        let mut json = Instance::new();
        for (key, item) in dictionary {
            json.set(key.as_str(), self.serialize_object(item)?);
        }
        Ok(Value::Object(json))
    }

    /// Converts a value no declaration describes into JSON data: dates become
    /// ISO strings, sets become arrays and maps become objects.
    fn serialize_untracked(&self, value: &Value) -> Result<Value> {
        Ok(match value {
            Value::Date(d) => Value::String(date::to_iso_string(d)),
            Value::Array(items) | Value::Set(items) => Value::Array(
                items
                    .iter()
                    .map(|item| self.serialize_untracked(item))
                    .collect::<Result<_>>()?,
            ),
            Value::Map(entries) => {
                let mut json = Instance::new();
                for (key, item) in &self.string_keyed(entries)? {
                    json.set(key.as_str(), self.serialize_untracked(item)?);
                }
                Value::Object(json)
            }
            other => other.clone(),
        })
    }

    /// The entries of a map as a plain object. Entries whose key is not a
    /// string are reported and left out.
    fn string_keyed(&self, entries: &[(Value, Value)]) -> Result<Instance> {
        let mut dictionary = Instance::new();
        for (key, item) in entries {
            match key {
                Value::String(key) => dictionary.set(key.as_str(), item.clone()),
                _ => self.report(SerializerError::mismatch(
                    Operation::Serialize,
                    key,
                    "string",
                    Location::unknown(),
                ))?,
            }
        }
        Ok(dictionary)
    }

    /// Reports a nullish value in place of an object or an array, if its
    /// policy disallows it.
    pub(crate) fn check_nullish(
        &self,
        operation: Operation,
        value: &Value,
        expected: &'static str,
    ) -> Result<()> {
        if self.options.nullish_policy.policy_for(value) == Some(Policy::Disallow) {
            self.report(SerializerError::nullish(operation, value, expected))?;
        }
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Tests
