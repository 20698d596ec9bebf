use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{DataStructure, Hook, Predicate, TypeRef};
use crate::{Instance, Value};

// -----------------------------------------------------------------------------
// TypeSource

/// The `ty` option of a property: either a type, or a predicate choosing one.
///
/// A predicate given as `ty` is stored as the property's predicate.
#[derive(Clone, Debug)]
pub enum TypeSource {
    Type(TypeRef),
    Predicate(Predicate),
}

impl From<TypeRef> for TypeSource {
    #[inline]
    fn from(value: TypeRef) -> Self {
        TypeSource::Type(value)
    }
}

impl From<Predicate> for TypeSource {
    #[inline]
    fn from(value: Predicate) -> Self {
        TypeSource::Predicate(value)
    }
}

// -----------------------------------------------------------------------------
// PropertyOptions

/// Per-property options of a declaration.
///
/// Every option is optional; unset options are inherited from a base class
/// declaration of the same key.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::{PropertyMetadata, PropertyOptions, TypeRef};
///
/// // Shorthand for `PropertyOptions::new().name("employeeId")`.
/// let id = PropertyMetadata::build("id", Some(PropertyOptions::from("employeeId")));
/// assert!(id.is_name_overridden());
///
/// let email = PropertyMetadata::build(
///     "email",
///     Some(PropertyOptions::new().ty(TypeRef::String).required(true)),
/// );
/// assert_eq!(email.name().as_single(), Some("email"));
/// assert!(!email.is_name_overridden());
/// assert!(email.is_required());
/// ```
#[derive(Clone, Debug, Default)]
pub struct PropertyOptions {
    pub(crate) name: Option<String>,
    pub(crate) names: Option<Vec<String>>,
    pub(crate) ty: Option<TypeSource>,
    pub(crate) predicate: Option<Predicate>,
    pub(crate) data_structure: Option<DataStructure>,
    pub(crate) required: Option<bool>,
    pub(crate) default_value: Option<Value>,
    pub(crate) before_serialize: Option<Hook>,
    pub(crate) after_serialize: Option<Hook>,
    pub(crate) before_deserialize: Option<Hook>,
    pub(crate) after_deserialize: Option<Hook>,
}

impl PropertyOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The external name of the property.
    #[inline]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Maps the property to several external names. The converted value is
    /// read slot by slot, one slot per name.
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// The type to convert the property to, or a [`Predicate`] choosing it.
    #[inline]
    pub fn ty(mut self, ty: impl Into<TypeSource>) -> Self {
        self.ty = Some(ty.into());
        self
    }

    #[inline]
    pub fn predicate(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(predicate);
        self
    }

    /// Marks the property as a string-keyed dictionary, serialized as a plain object.
    #[inline]
    pub fn dictionary(self) -> Self {
        self.data_structure(DataStructure::Dictionary)
    }

    #[inline]
    pub fn data_structure(mut self, data_structure: DataStructure) -> Self {
        self.data_structure = Some(data_structure);
        self
    }

    #[inline]
    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// Values equal to `value` are left out of the output.
    #[inline]
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    #[inline]
    pub fn before_serialize(
        mut self,
        f: impl Fn(Value, &Instance) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.before_serialize = Some(Hook::new(f));
        self
    }

    #[inline]
    pub fn after_serialize(
        mut self,
        f: impl Fn(Value, &Instance) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.after_serialize = Some(Hook::new(f));
        self
    }

    #[inline]
    pub fn before_deserialize(
        mut self,
        f: impl Fn(Value, &Instance) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.before_deserialize = Some(Hook::new(f));
        self
    }

    #[inline]
    pub fn after_deserialize(
        mut self,
        f: impl Fn(Value, &Instance) -> Value + Send + Sync + 'static,
    ) -> Self {
        self.after_deserialize = Some(Hook::new(f));
        self
    }
}

impl From<&str> for PropertyOptions {
    /// The string shorthand: an explicit external name.
    #[inline]
    fn from(name: &str) -> Self {
        Self::new().name(name)
    }
}

impl From<String> for PropertyOptions {
    #[inline]
    fn from(name: String) -> Self {
        Self::new().name(name)
    }
}
