use alloc::borrow::Cow;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use indexmap::IndexMap;

use crate::info::{ClassMetadata, ClassOptions, Constructor, FormatPropertyName};
use crate::info::{PropertyMetadata, PropertyOptions, TypeRef};
use crate::{Instance, Value};

// -----------------------------------------------------------------------------
// ClassDeclaration

/// Declares a class as serializable.
///
/// A declaration lists the class's fields with their declared types, which of
/// them are tracked properties, and how instances are constructed. It becomes a
/// [`ClassMetadata`] once [registered](crate::registry::ClassRegistry::register).
///
/// # Examples
///
/// ```
/// use jm_reflect::info::{PropertyOptions, TypeRef};
/// use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
/// use jm_reflect::Value;
///
/// let mut registry = ClassRegistry::new();
/// registry.register(
///     ClassDeclaration::new("Human")
///         .extends("LivingBeing")
///         .constructor_property(0, "name", TypeRef::String, PropertyOptions::new())
///         .property_with("birthDate", TypeRef::Date, PropertyOptions::from("birth")),
/// );
/// registry.register(ClassDeclaration::new("LivingBeing").property("id", TypeRef::Number));
///
/// let human = registry.instantiate(&TypeRef::class("Human"), &[Value::from("Ada")]);
/// assert_eq!(human.field("name"), &Value::from("Ada"));
/// assert_eq!(registry.base_class_names("Human"), ["LivingBeing"]);
/// ```
#[derive(Clone, Debug)]
pub struct ClassDeclaration {
    metadata: ClassMetadata,
}

impl ClassDeclaration {
    /// Starts the declaration of class `name`.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            metadata: ClassMetadata {
                name: name.into(),
                extends: None,
                base_class_names: Vec::new(),
                options: ClassOptions::default(),
                properties: IndexMap::new(),
                field_types: IndexMap::new(),
                constructor_mapping: BTreeMap::new(),
                initializers: Vec::new(),
                constructor: None,
            },
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Declares the direct base class.
    #[inline]
    pub fn extends(mut self, base: impl Into<Cow<'static, str>>) -> Self {
        self.metadata.extends = Some(base.into());
        self
    }

    /// Enables discriminator-based polymorphism for this class and its subclasses.
    #[inline]
    pub fn auto_predicate(mut self) -> Self {
        self.metadata.options.auto_predicate = true;
        self
    }

    /// Formats the non-overridden property names of this class.
    #[inline]
    pub fn format_property_names(
        mut self,
        f: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.metadata.options.format_property_name = Some(FormatPropertyName::new(f));
        self
    }

    /// Arguments passed to the constructor when deserialization creates an instance.
    #[inline]
    pub fn constructor_params(mut self, params: Vec<Value>) -> Self {
        self.metadata.options.constructor_params = params;
        self
    }

    /// Replaces the default constructor.
    #[inline]
    pub fn constructor(mut self, f: impl Fn(&[Value]) -> Instance + Send + Sync + 'static) -> Self {
        self.metadata.constructor = Some(Constructor::new(f));
        self
    }

    /// A field initialized on construction, before constructor arguments are assigned.
    #[inline]
    pub fn initializer(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.initializers.push((key.into(), value.into()));
        self
    }

    /// Declares an untracked field and its type.
    #[inline]
    pub fn field(mut self, key: impl Into<String>, ty: TypeRef) -> Self {
        self.metadata.field_types.insert(key.into(), ty);
        self
    }

    /// Declares a tracked property without options.
    pub fn property(mut self, key: impl Into<String>, ty: TypeRef) -> Self {
        let key = key.into();
        let metadata = PropertyMetadata::build(&key, None);
        self.metadata.field_types.insert(key.clone(), ty);
        self.metadata.properties.insert(key, metadata);
        self
    }

    /// Declares a tracked property.
    ///
    /// `ty` is the field's own type; the `ty` option names the type of what it
    /// holds (the element type of an array, the class of a nested object).
    pub fn property_with(
        mut self,
        key: impl Into<String>,
        ty: TypeRef,
        options: impl Into<PropertyOptions>,
    ) -> Self {
        let key = key.into();
        let metadata = PropertyMetadata::build(&key, Some(options.into()));
        self.metadata.field_types.insert(key.clone(), ty);
        self.metadata.properties.insert(key, metadata);
        self
    }

    /// Declares a tracked property initialized by constructor argument `index`.
    pub fn constructor_property(
        self,
        index: usize,
        key: impl Into<String>,
        ty: TypeRef,
        options: impl Into<PropertyOptions>,
    ) -> Self {
        let key = key.into();
        let mut declaration = self.property_with(key.clone(), ty, options);
        declaration.metadata.constructor_mapping.insert(index, key);
        declaration
    }

    /// Declares an untracked field initialized by constructor argument `index`.
    pub fn constructor_field(mut self, index: usize, key: impl Into<String>, ty: TypeRef) -> Self {
        let key = key.into();
        self.metadata.field_types.insert(key.clone(), ty);
        self.metadata.constructor_mapping.insert(index, key);
        self
    }

    #[inline]
    pub(crate) fn into_metadata(self) -> ClassMetadata {
        self.metadata
    }
}

// -----------------------------------------------------------------------------
// Tests
