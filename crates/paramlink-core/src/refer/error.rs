//! Reference registry errors

use thiserror::Error;

/// Errors raised while locating components
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    #[error("Invalid descriptor '{0}': expected group:type:kind:name:version")]
    InvalidDescriptor(String),

    #[error("Reference not found: {0}")]
    NotFound(String),
}

pub type ReferenceResult<T> = Result<T, ReferenceError>;
