//! Declaration metadata.
//!
//! ## Menu
//!
//! - [`TypeRef`]: a declared type, either a primitive kind (`String`, `Number`, `Date`, …)
//!   or a class by name.
//!
//! - Callbacks, all cheap to clone and `Send + Sync`:
//!     - [`Hook`]: `(value, owning instance) -> value`, run around a property conversion.
//!     - [`Predicate`]: `(raw value, parent) -> Option<TypeRef>`, picks a concrete type.
//!     - [`FormatPropertyName`]: `name -> name`, for names that were not overridden.
//!     - [`Constructor`]: `args -> Instance`, a custom constructor for a class.
//!
//! - [`PropertyOptions`]: what a declaration may say about a property, as a builder.
//!     - [`TypeSource`]: the `ty` option, either a type or a predicate.
//!
//! - [`PropertyMetadata`]: the canonical record built from [`PropertyOptions`].
//!     - [`PropertyName`]: one external name, or a group of them.
//!     - [`DataStructure`]: explicit container shape (`Array`, `Dictionary`, `Map`, `Set`).
//!
//! - [`ClassMetadata`]: the stored form of a class declaration.
//!     - [`ClassOptions`]: name formatter, constructor presets and the auto-predicate flag.

// -----------------------------------------------------------------------------
// Modules

mod callbacks;
mod class;
mod options;
mod property;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use callbacks::{Constructor, FormatPropertyName, Hook, Predicate};
pub use class::{ClassMetadata, ClassOptions};
pub use options::{PropertyOptions, TypeSource};
pub use property::{DataStructure, PropertyMetadata, PropertyName};
pub use type_ref::TypeRef;
