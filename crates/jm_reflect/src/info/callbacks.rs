use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::info::TypeRef;
use crate::{Instance, Value};

// -----------------------------------------------------------------------------
// Macros

macro_rules! impl_callback {
    ($name:ident) => {
        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(concat!(stringify!($name), "(..)"))
            }
        }

        impl PartialEq for $name {
            /// Two callbacks are equal when they are the same closure.
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0)
            }
        }
    };
}

// -----------------------------------------------------------------------------
// Hook

/// A `(value, owning instance) -> value` transformation run around a property
/// conversion.
#[derive(Clone)]
pub struct Hook(Arc<dyn Fn(Value, &Instance) -> Value + Send + Sync>);

impl Hook {
    #[inline]
    pub fn new(f: impl Fn(Value, &Instance) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, value: Value, instance: &Instance) -> Value {
        (self.0)(value, instance)
    }
}

impl_callback!(Hook);

// -----------------------------------------------------------------------------
// Predicate

/// Chooses the concrete type of a polymorphic property from the raw value and
/// its parent (the object or collection holding it).
///
/// Returning `None` means "no object type": the value is then coerced as a
/// scalar of the static declared type.
///
/// # Examples
///
/// ```
/// use jm_reflect::info::{Predicate, TypeRef};
/// use jm_reflect::{Instance, Value};
///
/// let animal = Predicate::new(|raw: &Value, _parent: &Value| {
///     if raw.get("isPoisonous").is_undefined() {
///         Some(TypeRef::class("Panther"))
///     } else {
///         Some(TypeRef::class("Snake"))
///     }
/// });
///
/// let snake = Value::from(Instance::new().with("isPoisonous", true));
/// assert_eq!(animal.call(&snake, &Value::Null), Some(TypeRef::class("Snake")));
/// ```
#[derive(Clone)]
pub struct Predicate(Arc<dyn Fn(&Value, &Value) -> Option<TypeRef> + Send + Sync>);

impl Predicate {
    #[inline]
    pub fn new(f: impl Fn(&Value, &Value) -> Option<TypeRef> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, raw: &Value, parent: &Value) -> Option<TypeRef> {
        (self.0)(raw, parent)
    }
}

impl_callback!(Predicate);

// -----------------------------------------------------------------------------
// FormatPropertyName

/// Rewrites a property name that was not explicitly overridden.
#[derive(Clone)]
pub struct FormatPropertyName(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl FormatPropertyName {
    #[inline]
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, name: &str) -> String {
        (self.0)(name)
    }
}

impl_callback!(FormatPropertyName);

// -----------------------------------------------------------------------------
// Constructor

/// A custom constructor: builds an instance from positional arguments.
#[derive(Clone)]
pub struct Constructor(Arc<dyn Fn(&[Value]) -> Instance + Send + Sync>);

impl Constructor {
    #[inline]
    pub fn new(f: impl Fn(&[Value]) -> Instance + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn call(&self, args: &[Value]) -> Instance {
        (self.0)(args)
    }
}

impl_callback!(Constructor);
