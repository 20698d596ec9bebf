//! Items used by exported macros. Not public API.

#[cfg(feature = "auto_register")]
#[doc(hidden)]
pub mod auto_register {
    pub use inventory;

    use crate::registry::ClassDeclaration;

    /// A declaration submitted with [`auto_register!`](crate::auto_register).
    pub struct __AutoRegisterClass(pub fn() -> ClassDeclaration);

    inventory::collect!(__AutoRegisterClass);
}
