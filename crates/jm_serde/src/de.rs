//! JSON to object graph.

use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;

use jm_reflect::info::{FormatPropertyName, Predicate, PropertyMetadata, PropertyName, TypeRef};
use jm_reflect::registry::DISCRIMINATOR_KEY;
use jm_reflect::value::try_parse;
use jm_reflect::{Instance, Value};

use crate::error::{Location, Operation, SerializerError};
use crate::options::Policy;
use crate::predicate::discriminated_type;
use crate::serializer::{DeserializeTarget, JsonSerializer, external_name, render};
use crate::structure::{Shape, resolve_shape};

type Result<T> = core::result::Result<T, SerializerError>;

impl JsonSerializer {
    /// Deserializes a JSON object, or an array of JSON objects, into `target`.
    ///
    /// A string is parsed as JSON text first. Anything that is not an object or
    /// an array is reported and gives `Undefined`.
    pub fn deserialize(
        &self,
        value: &Value,
        target: impl Into<DeserializeTarget>,
    ) -> Result<Value> {
        let target = target.into();
        let value = try_parse(value.clone());

        if value.is_array() {
            return self.deserialize_array_into(&value, &target);
        }
        if value.is_object() {
            return self.deserialize_object_into(&value, &target);
        }

        self.report(SerializerError::NotArrayNorObject {
            operation: Operation::Deserialize,
            received: value.render(),
        })?;
        Ok(Value::Undefined)
    }

    /// Deserializes JSON text.
    #[inline]
    pub fn deserialize_str(
        &self,
        text: &str,
        target: impl Into<DeserializeTarget>,
    ) -> Result<Value> {
        self.deserialize(&Value::from(text), target)
    }

    /// Deserializes a single JSON object (or JSON text holding one) into `target`.
    ///
    /// Deserializing into a type creates an instance with the constructor
    /// parameters declared for its class; classes using auto-predicate may
    /// pick a subclass from the discriminator key. Deserializing into an
    /// instance keeps the fields the input does not provide.
    pub fn deserialize_object(
        &self,
        value: &Value,
        target: impl Into<DeserializeTarget>,
    ) -> Result<Value> {
        self.deserialize_object_into(value, &target.into())
    }

    /// Deserializes every JSON object of an array (or JSON text holding one).
    ///
    /// Items deserializing to a nullish value are dropped when their policy is
    /// [`Policy::Remove`].
    pub fn deserialize_object_array(
        &self,
        value: &Value,
        target: impl Into<DeserializeTarget>,
    ) -> Result<Value> {
        self.deserialize_array_into(value, &target.into())
    }

    // -------------------------------------------------------------------------
    // Objects

    fn deserialize_object_into(&self, value: &Value, target: &DeserializeTarget) -> Result<Value> {
        if value.is_nullish() {
            self.check_nullish(Operation::Deserialize, value, "Object")?;
            return Ok(value.clone());
        }

        let raw = try_parse(value.clone());
        let Value::Object(obj) = &raw else {
            self.report(SerializerError::mismatch(
                Operation::Deserialize,
                &raw,
                "Object",
                Location::unknown(),
            ))?;
            return Ok(Value::Undefined);
        };

        let mut instance = match target {
            DeserializeTarget::Type(requested) => {
                let ty = discriminated_type(self.registry(), requested, &raw);
                let params = ty
                    .class_name()
                    .and_then(|class| self.registry().get(class))
                    .map(|metadata| metadata.options().constructor_params.as_slice())
                    .unwrap_or_default();
                self.registry().instantiate(&ty, params)
            }
            DeserializeTarget::Instance(instance) => instance.clone(),
        };

        let Some(class) = instance.class_name().map(ToOwned::to_owned) else {
            return Ok(Value::Object(instance));
        };
        let Some(properties) = self.registry().merged_properties(&class) else {
            return Ok(Value::Object(instance));
        };
        let formatter = self.name_formatter(&class);

        for (key, metadata) in &properties {
            let property =
                self.deserialize_property(&instance, &class, key, &raw, metadata, formatter)?;
            self.check_required_property(
                Operation::Deserialize,
                metadata,
                &instance,
                key,
                &property,
                obj,
            )?;

            let current = instance.field(key);
            let value = if property != *current
                && ((property.is_null() && current.is_undefined()) || !property.is_nullish())
            {
                property
            } else {
                current.clone()
            };

            if self.is_allowed_property(key, &value, Some(metadata))? {
                instance.set(key.as_str(), value);
            }
        }

        if self.options.additional_properties_policy == Policy::Remove {
            return Ok(Value::Object(instance));
        }

        let mut known: Vec<String> = Vec::new();
        for metadata in properties.values() {
            match metadata.name() {
                PropertyName::Single(name) => known.push(external_name(formatter, metadata, name)),
                PropertyName::Multiple(names) => known.extend(names.iter().cloned()),
            }
        }
        if self.registry().uses_auto_predicate(&class) {
            known.push(DISCRIMINATOR_KEY.into());
        }

        let additional: Vec<&String> = obj.keys().filter(|key| !known.contains(*key)).collect();
        if additional.is_empty() {
            return Ok(Value::Object(instance));
        }

        match self.options.additional_properties_policy {
            Policy::Disallow => self.report(SerializerError::AdditionalProperties {
                received: render(obj),
                properties: additional.into_iter().cloned().collect(),
            })?,
            Policy::Allow => {
                for key in additional {
                    instance.set(key.as_str(), obj.field(key).clone());
                }
            }
            Policy::Remove => {}
        }

        Ok(Value::Object(instance))
    }

    fn deserialize_array_into(&self, value: &Value, target: &DeserializeTarget) -> Result<Value> {
        if value.is_nullish() {
            self.check_nullish(Operation::Deserialize, value, "Array")?;
            return Ok(value.clone());
        }

        let raw = try_parse(value.clone());
        let Value::Array(items) = &raw else {
            self.report(SerializerError::mismatch(
                Operation::Deserialize,
                &raw,
                "Array",
                Location::unknown(),
            ))?;
            return Ok(Value::Undefined);
        };

        let mut array = Vec::with_capacity(items.len());
        for item in items {
            let item = self.deserialize_object_into(item, target)?;
            if self.keeps_item(&item) {
                array.push(item);
            }
        }
        Ok(Value::Array(array))
    }

    // -------------------------------------------------------------------------
    // Properties

    fn deserialize_property(
        &self,
        instance: &Instance,
        class: &str,
        key: &str,
        raw: &Value,
        metadata: &PropertyMetadata,
        formatter: Option<&FormatPropertyName>,
    ) -> Result<Value> {
        let source = data_source(raw, metadata, formatter);
        if source.is_nullish() {
            return Ok(source);
        }

        let declared = self.registry().field_type(class, key);
        let shape = resolve_shape(declared, instance.field(key), metadata);
        let element = metadata.ty().or(declared);
        let location = || Location::property(key, class);

        let source = match metadata.before_deserialize() {
            Some(hook) => hook.call(source, instance),
            None => source,
        };

        let property = match shape {
            Shape::Dictionary | Shape::Map => {
                let dictionary =
                    self.deserialize_dictionary(&source, element, metadata.predicate(), location())?;
                match (shape, dictionary) {
                    (Shape::Map, Value::Object(dictionary)) => Value::map_from(
                        dictionary
                            .iter()
                            .map(|(key, item)| (Value::from(key.as_str()), item.clone())),
                    ),
                    (_, dictionary) => dictionary,
                }
            }
            Shape::Array | Shape::Set => {
                let array =
                    self.deserialize_array(&source, element, metadata.predicate(), location())?;
                match (shape, array) {
                    (Shape::Set, Value::Array(items)) => Value::set_from(items),
                    (_, array) => array,
                }
            }
            Shape::Plain => match metadata.predicate() {
                Some(predicate) => match predicate.call(&source, raw) {
                    Some(ty) => self.deserialize_as(&source, &ty, location())?,
                    None => {
                        self.cast_simple_data(element.map(TypeRef::name), &source, location())?
                    }
                },
                None => match element {
                    Some(ty) if self.registry().is_tracked(ty) => {
                        self.deserialize_as(&source, ty, location())?
                    }
                    _ => self.cast_simple_data(element.map(TypeRef::name), &source, location())?,
                },
            },
        };

        Ok(match metadata.after_deserialize() {
            Some(hook) => hook.call(property, instance),
            None => property,
        })
    }

    fn deserialize_array(
        &self,
        value: &Value,
        element: Option<&TypeRef>,
        predicate: Option<&Predicate>,
        location: Location,
    ) -> Result<Value> {
        let Some(items) = value.as_items() else {
            self.report(SerializerError::mismatch(
                Operation::Deserialize,
                value,
                "Array",
                location,
            ))?;
            return Ok(Value::Undefined);
        };

        let mut array = Vec::with_capacity(items.len());
        for item in items {
            let item = self.deserialize_item(item, value, element, predicate, &location)?;
            if self.keeps_item(&item) {
                array.push(item);
            }
        }
        Ok(Value::Array(array))
    }

    fn deserialize_dictionary(
        &self,
        value: &Value,
        element: Option<&TypeRef>,
        predicate: Option<&Predicate>,
        location: Location,
    ) -> Result<Value> {
        let Value::Object(dictionary) = value else {
            self.report(SerializerError::mismatch(
                Operation::Deserialize,
                value,
                "Dictionary",
                location,
            ))?;
            return Ok(Value::Undefined);
        };

        let mut result = Instance::new();
        for (key, item) in dictionary {
            let item = self.deserialize_item(item, value, element, predicate, &location)?;
            result.set(key.as_str(), item);
        }
        Ok(Value::Object(result))
    }

    /// Converts an item of a collection into the type its predicate picks, or
    /// the element type when it is a declared class. Other items are kept as is.
    fn deserialize_item(
        &self,
        item: &Value,
        parent: &Value,
        element: Option<&TypeRef>,
        predicate: Option<&Predicate>,
        location: &Location,
    ) -> Result<Value> {
        let ty = predicate
            .and_then(|predicate| predicate.call(item, parent))
            .or_else(|| element.filter(|ty| self.registry().is_tracked(ty)).cloned());

        match ty {
            Some(ty) => self.deserialize_as(item, &ty, location.clone()),
            None => Ok(item.clone()),
        }
    }

    /// Deserializes an object of class `ty`, or coerces a scalar into primitive `ty`.
    fn deserialize_as(&self, value: &Value, ty: &TypeRef, location: Location) -> Result<Value> {
        if ty.class_name().is_some() {
            self.deserialize_object_into(value, &DeserializeTarget::Type(ty.clone()))
        } else {
            self.cast_simple_data(Some(ty.name()), value, location)
        }
    }
}

/// Reads the data of a property from a JSON object.
///
/// Multi-named properties read each of their names into an intermediate object.
fn data_source(
    raw: &Value,
    metadata: &PropertyMetadata,
    formatter: Option<&FormatPropertyName>,
) -> Value {
    match metadata.name() {
        PropertyName::Multiple(names) => Value::Object(
            names
                .iter()
                .map(|name| (name.as_str(), raw.get(name).clone()))
                .collect(),
        ),
        PropertyName::Single(name) => raw.get(&external_name(formatter, metadata, name)).clone(),
    }
}

// -----------------------------------------------------------------------------
// Tests
