//! Parameter resolution
//!
//! This module provides a single entry point for resolving connection and
//! credential parameters from local configuration or registered backends.

mod error;
mod param_resolver;

pub use error::{ResolveError, ResolveResult};
pub use param_resolver::ParamResolver;
