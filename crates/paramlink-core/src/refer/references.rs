//! Registry of components tagged with capability descriptors

use std::sync::Arc;

use parking_lot::RwLock;

use crate::discovery::Backend;
use super::descriptor::Descriptor;
use super::error::{ReferenceError, ReferenceResult};

/// A component that can be placed into `References`
///
/// Components expose the capabilities they implement through the `as_*`
/// accessors; the defaults report none. A component that is registered under
/// a backend descriptor but does not implement `Backend` is skipped when
/// resolvers look for backends.
pub trait Component: Send + Sync {
    /// Human-readable name, used in logs
    fn component_name(&self) -> &str;

    /// This component as a parameter backend, if it is one
    fn as_backend(self: Arc<Self>) -> Option<Arc<dyn Backend>> {
        None
    }
}

/// One registered component and its descriptor
#[derive(Clone)]
pub struct Reference {
    descriptor: Descriptor,
    component: Arc<dyn Component>,
}

impl Reference {
    pub fn new(descriptor: Descriptor, component: Arc<dyn Component>) -> Self {
        Self { descriptor, component }
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn component(&self) -> &Arc<dyn Component> {
        &self.component
    }
}

impl std::fmt::Debug for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reference")
            .field("descriptor", &self.descriptor.to_string())
            .field("component", &self.component.component_name())
            .finish()
    }
}

/// Registry of components, looked up by descriptor pattern
///
/// Owned by the application, which registers components at startup and
/// hands an `Arc<References>` to whoever needs to locate them. Lookups
/// return components in registration order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use paramlink_core::refer::{Descriptor, References};
/// use paramlink_core::discovery::MemoryBackend;
///
/// let references = References::new();
/// references.put(
///     Descriptor::new("acme", "discovery", "memory", "default", "1.0"),
///     Arc::new(MemoryBackend::new()),
/// );
///
/// let pattern = Descriptor::new("*", "discovery", "*", "*", "*");
/// assert_eq!(references.get_optional(&pattern).len(), 1);
/// ```
#[derive(Default)]
pub struct References {
    entries: RwLock<Vec<Reference>>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with initial components
    pub fn from_tuples(entries: Vec<(Descriptor, Arc<dyn Component>)>) -> Self {
        let references = Self::new();
        for (descriptor, component) in entries {
            references.put(descriptor, component);
        }
        references
    }

    /// Register a component
    pub fn put(&self, descriptor: Descriptor, component: Arc<dyn Component>) {
        self.entries.write().push(Reference::new(descriptor, component));
    }

    /// Remove the most recently registered component matching `pattern`
    pub fn remove(&self, pattern: &Descriptor) -> Option<Arc<dyn Component>> {
        let mut entries = self.entries.write();
        let index = entries.iter().rposition(|r| r.descriptor.matches(pattern))?;
        Some(entries.remove(index).component)
    }

    /// Remove every component matching `pattern`
    pub fn remove_all(&self, pattern: &Descriptor) -> Vec<Arc<dyn Component>> {
        let mut entries = self.entries.write();
        let (removed, kept): (Vec<Reference>, Vec<Reference>) = entries
            .drain(..)
            .partition(|r| r.descriptor.matches(pattern));
        *entries = kept;
        removed.into_iter().map(|r| r.component).collect()
    }

    /// All components matching `pattern`, in registration order
    pub fn get_optional(&self, pattern: &Descriptor) -> Vec<Arc<dyn Component>> {
        self.entries
            .read()
            .iter()
            .filter(|r| r.descriptor.matches(pattern))
            .map(|r| Arc::clone(&r.component))
            .collect()
    }

    /// All components matching `pattern`; fails when there are none
    pub fn get_required(&self, pattern: &Descriptor) -> ReferenceResult<Vec<Arc<dyn Component>>> {
        let found = self.get_optional(pattern);
        if found.is_empty() {
            return Err(ReferenceError::NotFound(pattern.to_string()));
        }
        Ok(found)
    }

    /// First component matching `pattern`
    pub fn get_one_optional(&self, pattern: &Descriptor) -> Option<Arc<dyn Component>> {
        self.entries
            .read()
            .iter()
            .find(|r| r.descriptor.matches(pattern))
            .map(|r| Arc::clone(&r.component))
    }

    /// Components matching `pattern` that implement `Backend`, in registration order
    pub fn get_backends(&self, pattern: &Descriptor) -> Vec<Arc<dyn Backend>> {
        self.get_optional(pattern)
            .into_iter()
            .filter_map(|c| c.as_backend())
            .collect()
    }

    /// Snapshot of all registrations
    pub fn get_all(&self) -> Vec<Reference> {
        self.entries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl std::fmt::Debug for References {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("References")
            .field("entries", &format!("[{} components]", self.len()))
            .finish()
    }
}
