//! The dynamic object graph.
//!
//! ## Menu
//!
//! - [`Value`]: a node of the graph, either side of a conversion.
//! - [`Instance`]: an object, optionally tagged with the class it is an instance of.
//! - [`date`]: ISO-8601 helpers for [`Value::Date`].
//!
//! The same value universe is used for in-memory objects and for serialized data.
//! Serialized data only ever contains `Undefined`, `Null`, `Bool`, `Number`,
//! `String`, `Array` and class-less `Object`s; the other variants only live in
//! object graphs.
//!
//! `Undefined` and `Null` are distinct. A field holding `Undefined` is still a
//! *present* field of its [`Instance`], which matters to the engine (own-key checks).

// -----------------------------------------------------------------------------
// Modules

pub mod date;

mod instance;
mod json;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use instance::Instance;
pub use json::try_parse;
pub use value::Value;
