use alloc::borrow::Cow;
use alloc::string::String;

use indexmap::IndexMap;
use indexmap::map::{Iter, Keys};

use crate::value::Value;
use crate::value::value::UNDEFINED;

// -----------------------------------------------------------------------------
// Instance

/// An object of the graph: an insertion-ordered field table, optionally tagged
/// with the class it is an instance of.
///
/// A class-less instance is a plain object (`{}`), which is also how JSON objects
/// are represented.
///
/// # Examples
///
/// ```
/// use jm_reflect::{Instance, Value};
///
/// let mut employee = Instance::of_class("Employee").with("name", "Fried Richter");
/// employee.set("email", Value::Undefined);
///
/// // `email` is present, `id` is not.
/// assert!(employee.contains_key("email"));
/// assert!(!employee.contains_key("id"));
/// assert_eq!(employee.field("id"), &Value::Undefined);
/// assert_eq!(employee.constructor_name(), "Employee");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instance {
    class: Option<Cow<'static, str>>,
    fields: IndexMap<String, Value>,
}

impl Instance {
    /// Creates an empty plain object.
    #[inline]
    pub fn new() -> Self {
        Self {
            class: None,
            fields: IndexMap::new(),
        }
    }

    /// Creates an empty instance of `class`.
    #[inline]
    pub fn of_class(class: impl Into<Cow<'static, str>>) -> Self {
        Self {
            class: Some(class.into()),
            fields: IndexMap::new(),
        }
    }

    /// Returns the class this is an instance of, `None` for plain objects.
    #[inline]
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    /// Returns the class name, or `"Object"` for plain objects.
    #[inline]
    pub fn constructor_name(&self) -> &str {
        self.class.as_deref().unwrap_or("Object")
    }

    /// Re-tags this instance with another class, keeping its fields.
    #[inline]
    pub fn set_class(&mut self, class: Option<Cow<'static, str>>) {
        self.class = class;
    }

    /// Sets a field, builder style.
    #[inline]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Sets a field. An existing field keeps its position.
    #[inline]
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the field if it is present, even when it holds `Undefined`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.fields.get_mut(key)
    }

    /// Reads a field; an absent field reads `Undefined`.
    #[inline]
    pub fn field(&self, key: &str) -> &Value {
        self.fields.get(key).unwrap_or(&UNDEFINED)
    }

    /// Whether `key` is an own field of this instance.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Removes a field, keeping the order of the others.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    #[inline]
    pub fn keys(&self) -> Keys<'_, String, Value> {
        self.fields.keys()
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, String, Value> {
        self.fields.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Instance {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut instance = Instance::new();
        for (key, value) in iter {
            instance.set(key, value);
        }
        instance
    }
}

impl<'a> IntoIterator for &'a Instance {
    type Item = (&'a String, &'a Value);
    type IntoIter = Iter<'a, String, Value>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// -----------------------------------------------------------------------------
// Tests
