//! Parameter backends: discovery services and credential stores
//!
//! This module provides the backend contract resolvers call into:
//! - `Backend` trait for implementing custom discovery services / credential stores
//! - Built-in implementation: `MemoryBackend`

mod traits;
mod memory;

pub use traits::{Backend, BackendError, BackendResult};
pub use memory::MemoryBackend;
