use alloc::string::String;

use thiserror::Error;

use crate::info::TypeRef;

// -----------------------------------------------------------------------------
// Error

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegistryError {
    #[error("Class '{0}' has not been declared")]
    UnknownClass(String),

    #[error("Type '{0}' is not a class")]
    NotAClass(TypeRef),
}
