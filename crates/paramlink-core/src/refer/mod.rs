//! Capability-based component references
//!
//! Components are registered under a `Descriptor` and located by pattern:
//! - `Descriptor`: `group:type:kind:name:version` tag with `*` wildcards
//! - `References`: the registry itself
//! - `Component`: what a registered component exposes (e.g. `as_backend`)

mod error;
mod descriptor;
mod references;

pub use error::{ReferenceError, ReferenceResult};
pub use descriptor::Descriptor;
pub use references::{Component, Reference, References};
