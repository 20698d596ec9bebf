use alloc::borrow::Cow;
use core::fmt;

// -----------------------------------------------------------------------------
// TypeRef

/// The declared type of a field.
///
/// Primitive kinds drive scalar coercion, container kinds drive shape
/// inference, and [`TypeRef::Class`] names a declared class.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::TypeRef;
///
/// assert_eq!(TypeRef::Date.name(), "Date");
/// assert_eq!(TypeRef::class("Panther").name(), "Panther");
/// assert_eq!(TypeRef::Number.class_name(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeRef {
    String,
    Number,
    Boolean,
    Date,
    Array,
    Set,
    Map,
    /// The generic object type; also what an optional container field erases to.
    Object,
    Class(Cow<'static, str>),
}

impl TypeRef {
    /// Refers to a class by name.
    #[inline]
    pub fn class(name: impl Into<Cow<'static, str>>) -> Self {
        TypeRef::Class(name.into())
    }

    /// The name of the type, as a constructor name would read.
    pub fn name(&self) -> &str {
        match self {
            TypeRef::String => "String",
            TypeRef::Number => "Number",
            TypeRef::Boolean => "Boolean",
            TypeRef::Date => "Date",
            TypeRef::Array => "Array",
            TypeRef::Set => "Set",
            TypeRef::Map => "Map",
            TypeRef::Object => "Object",
            TypeRef::Class(name) => name,
        }
    }

    #[inline]
    pub fn class_name(&self) -> Option<&str> {
        match self {
            TypeRef::Class(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
