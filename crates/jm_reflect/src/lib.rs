//! Object model and declaration metadata for `jsonmap`.
//!
//! ## Menu
//!
//! - [`value`]: the dynamic object graph ([`Value`], [`Instance`]) the engine walks,
//!   and its JSON projection.
//! - [`info`]: per-property metadata ([`PropertyMetadata`](info::PropertyMetadata)),
//!   per-class metadata, declared types and user callbacks.
//! - [`registry`]: the process-wide store of declared classes
//!   ([`ClassRegistry`](registry::ClassRegistry)) and the inheritance merge.
//!
//! A class is declared once, before any conversion runs:
//!
//! ```
//! use jm_reflect::info::{PropertyOptions, TypeRef};
//! use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
//!
//! let mut registry = ClassRegistry::new();
//! registry.register(
//!     ClassDeclaration::new("Zoo")
//!         .property("name", TypeRef::String)
//!         .property_with("animals", TypeRef::Array, PropertyOptions::from("Animals")),
//! );
//!
//! let merged = registry.merged_properties("Zoo").unwrap();
//! assert_eq!(merged["animals"].name().as_single(), Some("Animals"));
//! ```

// -----------------------------------------------------------------------------
// Extern Self

extern crate self as jm_reflect;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod info;
pub mod registry;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use value::{Instance, Value};
