use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use jm_reflect::Value;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Operation

/// The direction of a conversion, as named in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Serialize,
    Deserialize,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Serialize => "serialize",
            Operation::Deserialize => "deserialize",
        })
    }
}

// -----------------------------------------------------------------------------
// Location

/// The property, and the class owning it, a conversion error happened at.
///
/// Renders as an empty string when unknown, so it can follow a message directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub property: Option<String>,
    pub class: Option<String>,
}

impl Location {
    /// No known location.
    #[inline]
    pub const fn unknown() -> Self {
        Self {
            property: None,
            class: None,
        }
    }

    /// Property `property` of class `class`.
    #[inline]
    pub fn property(property: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            property: Some(property.into()),
            class: Some(class.into()),
        }
    }
}

impl From<&str> for Location {
    /// A property of an unknown class.
    #[inline]
    fn from(property: &str) -> Self {
        Self {
            property: Some(String::from(property)),
            class: None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.property, &self.class) {
            (Some(property), Some(class)) => write!(f, " in property '{property}' of {class}"),
            (Some(property), None) => write!(f, " in property '{property}'"),
            (None, _) => Ok(()),
        }
    }
}

// -----------------------------------------------------------------------------
// Error

/// Everything a conversion can report.
///
/// Errors are handed to the configured
/// [`ErrorCallback`](crate::options::ErrorCallback), which decides whether the
/// conversion goes on or aborts.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum SerializerError {
    #[error("Fail to {operation}: null is not assignable to type {expected}.")]
    NullNotAssignable {
        operation: Operation,
        expected: &'static str,
    },

    #[error("Fail to {operation}: undefined is not assignable to type {expected}.")]
    UndefinedNotAssignable {
        operation: Operation,
        expected: &'static str,
    },

    #[error("Fail to {operation}: value is not an Array nor an Object.\nReceived: {received}.")]
    NotArrayNorObject {
        operation: Operation,
        received: String,
    },

    #[error(
        "Fail to {operation}: type '{actual}' is not assignable to type '{expected}'{location}.\nReceived: {received}."
    )]
    TypeMismatch {
        operation: Operation,
        actual: String,
        expected: String,
        location: Location,
        received: String,
    },

    #[error("Fail to {operation}: Property '{key}' is required in {class} {received}.")]
    RequiredProperty {
        operation: Operation,
        key: String,
        class: String,
        received: String,
    },

    #[error("Disallowed {value} value detected: {name}.")]
    DisallowedNullish { value: Value, name: String },

    #[error("Additional properties detected in {received}: {}.", .properties.join(","))]
    AdditionalProperties {
        received: String,
        properties: Vec<String>,
    },
}

impl SerializerError {
    /// A value of the wrong kind or shape.
    pub(crate) fn mismatch(
        operation: Operation,
        value: &Value,
        expected: impl Into<String>,
        location: Location,
    ) -> Self {
        SerializerError::TypeMismatch {
            operation,
            actual: value.type_of().into(),
            expected: expected.into(),
            location,
            received: value.render(),
        }
    }

    /// `null` or `undefined` where an object or an array was expected.
    pub(crate) fn nullish(operation: Operation, value: &Value, expected: &'static str) -> Self {
        if value.is_null() {
            SerializerError::NullNotAssignable {
                operation,
                expected,
            }
        } else {
            SerializerError::UndefinedNotAssignable {
                operation,
                expected,
            }
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
