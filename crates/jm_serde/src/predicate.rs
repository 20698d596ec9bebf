use alloc::string::ToString;

use jm_reflect::Value;
use jm_reflect::info::TypeRef;
use jm_reflect::registry::{ClassRegistry, DISCRIMINATOR_KEY};

/// The class to instantiate for `raw` when `requested` is asked for.
///
/// Classes declared with auto-predicate (or deriving from one) read the
/// discriminator key of `raw`: a tag naming `requested` or one of its
/// registered subclasses selects that class. Anything else keeps `requested`.
pub(crate) fn discriminated_type(
    registry: &ClassRegistry,
    requested: &TypeRef,
    raw: &Value,
) -> TypeRef {
    let Some(class) = requested.class_name() else {
        return requested.clone();
    };
    if !registry.uses_auto_predicate(class) {
        return requested.clone();
    }

    match raw.get(DISCRIMINATOR_KEY) {
        Value::String(tag) if tag == class => requested.clone(),
        Value::String(tag) if registry.is_subclass_of(tag, class) => {
            log::trace!("'{tag}' selected for '{class}'");
            TypeRef::class(tag.to_string())
        }
        Value::Undefined => requested.clone(),
        other => {
            log::warn!(
                "'{DISCRIMINATOR_KEY}' {} does not name '{class}' or one of its subclasses",
                other.render()
            );
            requested.clone()
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
