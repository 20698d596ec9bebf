use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::Value;
use crate::info::{Constructor, FormatPropertyName, PropertyMetadata, TypeRef};

// -----------------------------------------------------------------------------
// ClassOptions

/// Per-class behavior.
#[derive(Clone, Debug, Default)]
pub struct ClassOptions {
    /// Applied to non-overridden names of this class's properties, before the
    /// serializer-wide formatter.
    pub format_property_name: Option<FormatPropertyName>,
    /// Arguments the class is constructed with when deserialization creates it.
    pub constructor_params: Vec<Value>,
    /// Embed the concrete class name in serialized instances of this class and
    /// its subclasses, and dispatch on it when deserializing.
    pub auto_predicate: bool,
}

// -----------------------------------------------------------------------------
// ClassMetadata

/// The stored form of a class declaration.
///
/// Created by [`ClassDeclaration`](crate::registry::ClassDeclaration) and owned by a
/// [`ClassRegistry`](crate::registry::ClassRegistry), which fills in the ancestor list.
#[derive(Clone, Debug)]
pub struct ClassMetadata {
    pub(crate) name: Cow<'static, str>,
    pub(crate) extends: Option<Cow<'static, str>>,
    pub(crate) base_class_names: Vec<String>,
    pub(crate) options: ClassOptions,
    pub(crate) properties: IndexMap<String, PropertyMetadata>,
    pub(crate) field_types: IndexMap<String, TypeRef>,
    pub(crate) constructor_mapping: BTreeMap<usize, String>,
    pub(crate) initializers: Vec<(String, Value)>,
    pub(crate) constructor: Option<Constructor>,
}

impl ClassMetadata {
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The direct base class, as declared.
    #[inline]
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    /// Ancestors of the class, root-most first. Only registered ancestors are listed.
    #[inline]
    pub fn base_class_names(&self) -> &[String] {
        &self.base_class_names
    }

    #[inline]
    pub fn options(&self) -> &ClassOptions {
        &self.options
    }

    /// The properties declared by this class itself, in declaration order.
    #[inline]
    pub fn properties(&self) -> &IndexMap<String, PropertyMetadata> {
        &self.properties
    }

    /// The declared type of a field of this class, tracked or not.
    #[inline]
    pub fn field_type(&self, key: &str) -> Option<&TypeRef> {
        self.field_types.get(key)
    }

    /// Constructor positions mapped to the field each one initializes.
    #[inline]
    pub fn constructor_mapping(&self) -> &BTreeMap<usize, String> {
        &self.constructor_mapping
    }

    #[inline]
    pub fn initializers(&self) -> &[(String, Value)] {
        &self.initializers
    }

    #[inline]
    pub fn constructor(&self) -> Option<&Constructor> {
        self.constructor.as_ref()
    }
}
