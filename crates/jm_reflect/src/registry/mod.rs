//! Provide the class registry, the store of serializable class declarations.
//!
//! ## Menu
//!
//! - [`ClassDeclaration`]: a builder declaring a class, its fields and its tracked properties.
//! - [`ClassRegistry`]: a container for storing and querying [`ClassMetadata`].
//!     - Inheritance queries: [`base_class_names`], [`subclasses`], [`merged_properties`].
//!     - Construction: [`instantiate`].
//! - [`ClassRegistryArc`]: a shared registry behind a `RwLock`.
//! - [`RegistryError`]: why a class lookup failed.
//! - [`DISCRIMINATOR_KEY`]: the key holding the concrete class name of auto-predicate classes.
//!
//! ## auto_register
//!
//! See [`ClassRegistry::auto_register`] and [`auto_register!`](crate::auto_register).
//!
//! We use [`inventory`] crate to collect declarations spread over a program,
//! not all platforms support it (although major platforms do).
//!
//! [`ClassMetadata`]: crate::info::ClassMetadata
//! [`base_class_names`]: ClassRegistry::base_class_names
//! [`subclasses`]: ClassRegistry::subclasses
//! [`merged_properties`]: ClassRegistry::merged_properties
//! [`instantiate`]: ClassRegistry::instantiate
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod class_registry;
mod declaration;
mod error;
mod hierarchy;

// -----------------------------------------------------------------------------
// Exports

pub use class_registry::{ClassRegistry, ClassRegistryArc};
pub use declaration::ClassDeclaration;
pub use error::RegistryError;

/// The reserved key naming the concrete class of a serialized auto-predicate instance.
pub const DISCRIMINATOR_KEY: &str = "__class__";
