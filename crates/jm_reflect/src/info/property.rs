use alloc::string::String;
use alloc::vec::Vec;

use crate::Value;
use crate::info::{Hook, Predicate, PropertyOptions, TypeRef, TypeSource};

// -----------------------------------------------------------------------------
// PropertyName

/// The external name(s) of a property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyName {
    Single(String),
    /// One in-memory field spread over several external keys, one slot each.
    Multiple(Vec<String>),
}

impl PropertyName {
    #[inline]
    pub fn as_single(&self) -> Option<&str> {
        match self {
            PropertyName::Single(name) => Some(name),
            PropertyName::Multiple(_) => None,
        }
    }

    #[inline]
    pub fn as_multiple(&self) -> Option<&[String]> {
        match self {
            PropertyName::Single(_) => None,
            PropertyName::Multiple(names) => Some(names),
        }
    }

    #[inline]
    pub const fn is_multiple(&self) -> bool {
        matches!(self, PropertyName::Multiple(_))
    }
}

// -----------------------------------------------------------------------------
// DataStructure

/// An explicit container shape, overriding inference from the declared type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataStructure {
    Array,
    /// A string-keyed table stored as a plain object.
    Dictionary,
    Map,
    Set,
}

// -----------------------------------------------------------------------------
// PropertyMetadata

/// The canonical metadata record of one declared property.
///
/// Built once by [`PropertyMetadata::build`], then only read.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyMetadata {
    name: PropertyName,
    is_name_overridden: bool,
    ty: Option<TypeRef>,
    predicate: Option<Predicate>,
    data_structure: Option<DataStructure>,
    required: Option<bool>,
    default_value: Option<Value>,
    before_serialize: Option<Hook>,
    after_serialize: Option<Hook>,
    before_deserialize: Option<Hook>,
    after_deserialize: Option<Hook>,
}

impl PropertyMetadata {
    /// Builds the record of property `key` from its declared options.
    ///
    /// - No options: the external name is `key`, not overridden.
    /// - `name` or a non-empty `names`: used as the external name(s), overridden.
    /// - A predicate given as `ty` becomes the predicate.
    ///
    /// Everything else is copied as is. This never fails.
    pub fn build(key: &str, options: Option<PropertyOptions>) -> Self {
        let Some(options) = options else {
            return Self::named(PropertyName::Single(key.into()), false);
        };

        let PropertyOptions {
            name,
            names,
            ty,
            predicate,
            data_structure,
            required,
            default_value,
            before_serialize,
            after_serialize,
            before_deserialize,
            after_deserialize,
        } = options;

        let mut metadata = match (name, names) {
            (Some(name), _) => Self::named(PropertyName::Single(name), true),
            (None, Some(names)) if !names.is_empty() => {
                Self::named(PropertyName::Multiple(names), true)
            }
            _ => Self::named(PropertyName::Single(key.into()), false),
        };

        match (predicate, ty) {
            (Some(predicate), _) | (None, Some(TypeSource::Predicate(predicate))) => {
                metadata.predicate = Some(predicate);
            }
            (None, Some(TypeSource::Type(ty))) => metadata.ty = Some(ty),
            (None, None) => {}
        }

        metadata.data_structure = data_structure;
        metadata.required = required;
        metadata.default_value = default_value;
        metadata.before_serialize = before_serialize;
        metadata.after_serialize = after_serialize;
        metadata.before_deserialize = before_deserialize;
        metadata.after_deserialize = after_deserialize;
        metadata
    }

    #[inline]
    fn named(name: PropertyName, is_name_overridden: bool) -> Self {
        Self {
            name,
            is_name_overridden,
            ty: None,
            predicate: None,
            data_structure: None,
            required: None,
            default_value: None,
            before_serialize: None,
            after_serialize: None,
            before_deserialize: None,
            after_deserialize: None,
        }
    }

    /// Overlays `self`, a derived declaration, on `base`, the declaration of the
    /// same key in an ancestor.
    ///
    /// The name always comes from `self`. A type or predicate on `self` replaces
    /// both of `base`'s. Other attributes set on `self` win, unset ones are
    /// inherited.
    pub fn merge_over(&self, base: &PropertyMetadata) -> PropertyMetadata {
        let (ty, predicate) = if self.ty.is_some() || self.predicate.is_some() {
            (self.ty.clone(), self.predicate.clone())
        } else {
            (base.ty.clone(), base.predicate.clone())
        };

        PropertyMetadata {
            name: self.name.clone(),
            is_name_overridden: self.is_name_overridden,
            ty,
            predicate,
            data_structure: self.data_structure.or(base.data_structure),
            required: self.required.or(base.required),
            default_value: self
                .default_value
                .clone()
                .or_else(|| base.default_value.clone()),
            before_serialize: self
                .before_serialize
                .clone()
                .or_else(|| base.before_serialize.clone()),
            after_serialize: self
                .after_serialize
                .clone()
                .or_else(|| base.after_serialize.clone()),
            before_deserialize: self
                .before_deserialize
                .clone()
                .or_else(|| base.before_deserialize.clone()),
            after_deserialize: self
                .after_deserialize
                .clone()
                .or_else(|| base.after_deserialize.clone()),
        }
    }

    #[inline]
    pub fn name(&self) -> &PropertyName {
        &self.name
    }

    /// Whether the external name was given explicitly. Name formatters only
    /// apply to names that were not.
    #[inline]
    pub fn is_name_overridden(&self) -> bool {
        self.is_name_overridden
    }

    #[inline]
    pub fn ty(&self) -> Option<&TypeRef> {
        self.ty.as_ref()
    }

    #[inline]
    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    #[inline]
    pub fn data_structure(&self) -> Option<DataStructure> {
        self.data_structure
    }

    #[inline]
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    #[inline]
    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    #[inline]
    pub fn before_serialize(&self) -> Option<&Hook> {
        self.before_serialize.as_ref()
    }

    #[inline]
    pub fn after_serialize(&self) -> Option<&Hook> {
        self.after_serialize.as_ref()
    }

    #[inline]
    pub fn before_deserialize(&self) -> Option<&Hook> {
        self.before_deserialize.as_ref()
    }

    #[inline]
    pub fn after_deserialize(&self) -> Option<&Hook> {
        self.after_deserialize.as_ref()
    }
}

// -----------------------------------------------------------------------------
// Tests
