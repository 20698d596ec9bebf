//! Converts object graphs to plain JSON values and back.
//!
//! A [`JsonSerializer`] walks [`Value`](jm_reflect::Value)s, driven by the
//! class declarations of a [`ClassRegistry`](jm_reflect::registry::ClassRegistry):
//! renamed and multi-named properties, nested classes, arrays, sets,
//! dictionaries and maps, hooks, required properties, and polymorphic
//! properties resolved by predicate or by the `__class__` discriminator.
//!
//! ## Menu
//!
//! - [`JsonSerializer`]: the engine.
//!   - [`serialize`](JsonSerializer::serialize), [`deserialize`](JsonSerializer::deserialize)
//!     and their object/array variants.
//!   - [`cast_simple_data`](JsonSerializer::cast_simple_data): scalar coercion.
//! - [`options`]: policies and the error callback.
//! - [`SerializerError`]: everything a conversion reports.
//! - [`serialize`] and [`deserialize`]: one-shot functions over the global registry.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use jm_reflect::info::{PropertyOptions, TypeRef};
//! use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
//! use jm_reflect::{Instance, Value};
//! use jm_serde::JsonSerializer;
//! use jm_serde::options::{ErrorCallback, JsonSerializerOptions};
//!
//! let mut registry = ClassRegistry::new();
//! registry.register(
//!     ClassDeclaration::new("Employee")
//!         .property("name", TypeRef::String)
//!         .property_with("email", TypeRef::String, PropertyOptions::new().required(true)),
//! );
//!
//! let options = JsonSerializerOptions::default().with_error_callback(Some(ErrorCallback::throw()));
//! let serializer = JsonSerializer::with_options(Arc::new(registry), options);
//!
//! let json = Value::from_json_str(r#"{"name":"Fried Richter"}"#).unwrap();
//! let error = serializer.deserialize(&json, "Employee").unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     r#"Fail to deserialize: Property 'email' is required in Employee {"name":"Fried Richter"}."#
//! );
//!
//! let employee = Instance::of_class("Employee")
//!     .with("name", "Fried Richter")
//!     .with("email", "f.richter@zoo.com");
//! assert!(serializer.serialize(&Value::from(employee)).is_ok());
//! ```

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod options;

mod api;
mod cast;
mod de;
mod error;
mod predicate;
mod ser;
mod serializer;
mod structure;

// -----------------------------------------------------------------------------
// Exports

pub use api::{deserialize, serialize};
pub use error::{Location, Operation, SerializerError};
pub use serializer::{DeserializeTarget, JsonSerializer};
