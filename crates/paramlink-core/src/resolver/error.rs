//! Resolver error types

use thiserror::Error;

use crate::discovery::BackendError;
use crate::refer::Descriptor;

/// Errors that can occur while resolving parameters
///
/// "Nothing found" is not an error: resolvers report it as `Ok(None)`.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A bundle asked for backend resolution, references are set, but no
    /// registered component is a backend for this kind
    #[error(
        "No backend matching {descriptor} was found to make lookup (correlation id: {})",
        .correlation_id.as_deref().unwrap_or("none")
    )]
    ReferenceMissing {
        correlation_id: Option<String>,
        descriptor: Descriptor,
    },

    /// A backend call failed; passed through unchanged
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ResolveError {
    /// Create a reference missing error
    pub fn reference_missing(correlation_id: Option<&str>, descriptor: Descriptor) -> Self {
        Self::ReferenceMissing {
            correlation_id: correlation_id.map(str::to_string),
            descriptor,
        }
    }
}

pub type ResolveResult<T> = Result<T, ResolveError>;
