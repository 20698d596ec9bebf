use jm_reflect::Value;
use jm_reflect::info::{DataStructure, PropertyMetadata, TypeRef};

/// The container shape a property value is converted as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Shape {
    /// A single value: an object, or a scalar.
    Plain,
    Array,
    Set,
    /// A plain object whose values all share the property type.
    Dictionary,
    Map,
}

impl From<DataStructure> for Shape {
    #[inline]
    fn from(value: DataStructure) -> Self {
        match value {
            DataStructure::Array => Shape::Array,
            DataStructure::Set => Shape::Set,
            DataStructure::Dictionary => Shape::Dictionary,
            DataStructure::Map => Shape::Map,
        }
    }
}

/// Resolves the shape of a property.
///
/// An explicit data structure wins, then the declared type of the field. A
/// field declared as the generic `Object` takes the shape of the value it
/// currently holds.
pub(crate) fn resolve_shape(
    declared: Option<&TypeRef>,
    existing: &Value,
    metadata: &PropertyMetadata,
) -> Shape {
    if let Some(data_structure) = metadata.data_structure() {
        return data_structure.into();
    }

    match declared {
        Some(TypeRef::Array) => Shape::Array,
        Some(TypeRef::Set) => Shape::Set,
        Some(TypeRef::Map) => Shape::Map,
        Some(TypeRef::Object) => match existing {
            Value::Array(_) => Shape::Array,
            Value::Set(_) => Shape::Set,
            Value::Map(_) => Shape::Map,
            _ => Shape::Plain,
        },
        _ => Shape::Plain,
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use jm_reflect::Value;
    use jm_reflect::info::{DataStructure, PropertyMetadata, PropertyOptions, TypeRef};

    use super::{Shape, resolve_shape};

    #[test]
    fn explicit_structure_wins() {
        let metadata =
            PropertyMetadata::build("unknownAnimals", Some(PropertyOptions::new().dictionary()));
        assert_eq!(
            resolve_shape(Some(&TypeRef::Array), &Value::Undefined, &metadata),
            Shape::Dictionary
        );

        let metadata = PropertyMetadata::build(
            "tags",
            Some(PropertyOptions::new().data_structure(DataStructure::Set)),
        );
        assert_eq!(resolve_shape(None, &Value::Undefined, &metadata), Shape::Set);
    }

    #[test]
    fn declared_type() {
        let metadata = PropertyMetadata::build("animals", None);
        assert_eq!(
            resolve_shape(Some(&TypeRef::Array), &Value::Undefined, &metadata),
            Shape::Array
        );
        assert_eq!(
            resolve_shape(Some(&TypeRef::Map), &Value::Undefined, &metadata),
            Shape::Map
        );
        assert_eq!(
            resolve_shape(Some(&TypeRef::class("Panther")), &Value::Array(vec![]), &metadata),
            Shape::Plain
        );
        assert_eq!(resolve_shape(None, &Value::Undefined, &metadata), Shape::Plain);
    }

    #[test]
    fn generic_object_uses_existing_value() {
        let metadata = PropertyMetadata::build("employees", None);
        let existing = Value::set_from([Value::from(1)]);
        assert_eq!(
            resolve_shape(Some(&TypeRef::Object), &existing, &metadata),
            Shape::Set
        );
        assert_eq!(
            resolve_shape(Some(&TypeRef::Object), &Value::Undefined, &metadata),
            Shape::Plain
        );
    }
}
