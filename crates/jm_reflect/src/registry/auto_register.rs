/// Submits a class declaration for [`ClassRegistry::auto_register`].
///
/// The argument is a path to a `fn() -> ClassDeclaration`. Declarations
/// submitted anywhere in the program are collected by
/// [`ClassRegistry::auto_register`], and so end up in [`ClassRegistry::global`].
///
/// Expands to nothing when the `auto_register` feature is disabled.
///
/// # Examples
///
/// ```no_run
/// use jm_reflect::info::TypeRef;
/// use jm_reflect::registry::{ClassDeclaration, ClassRegistry};
///
/// fn token() -> ClassDeclaration {
///     ClassDeclaration::new("Token").property("value", TypeRef::String)
/// }
///
/// jm_reflect::auto_register!(token);
///
/// assert!(ClassRegistry::global().contains("Token"));
/// ```
///
/// [`ClassRegistry::auto_register`]: crate::registry::ClassRegistry::auto_register
/// [`ClassRegistry::global`]: crate::registry::ClassRegistry::global
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register {
    ($declare:path) => {
        const _: () = {
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::__AutoRegisterClass($declare)
            }
        };
    };
}

/// Submits a class declaration for `ClassRegistry::auto_register`.
///
/// Expands to nothing, the `auto_register` feature is disabled.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register {
    ($declare:path) => {};
}
