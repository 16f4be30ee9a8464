//! Core traits and types for parameter backends

use async_trait::async_trait;
use thiserror::Error;

use crate::params::ParamBundle;

/// Errors that can occur during backend operations
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Backend is read-only")]
    ReadOnly,

    #[error("Backend not available: {0}")]
    NotAvailable(String),

    #[error("Backend error: {0}")]
    Other(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Trait for discovery services and credential stores
///
/// A backend keeps parameter bundles under string keys. Implementations can be:
/// - In-memory (`MemoryBackend`)
/// - Custom implementations (files, Consul, Vault, a cloud secret manager, etc.)
///
/// Every call carries an optional correlation id, used only to trace a
/// request through the call chain.
///
/// # Example
///
/// ```rust,ignore
/// use paramlink_core::discovery::{Backend, MemoryBackend};
/// use paramlink_core::params::ParamBundle;
///
/// let backend = MemoryBackend::new();
/// backend
///     .register(Some("123"), "db", ParamBundle::connection([("host", "db1")]))
///     .await
///     .unwrap();
/// let found = backend.resolve_one(Some("123"), "db").await.unwrap();
/// assert_eq!(found.unwrap().host(), Some("db1"));
/// ```
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable name of this backend
    fn name(&self) -> &str;

    /// Register a bundle under `key`
    ///
    /// Registrations under the same key accumulate in order; nothing is overwritten.
    async fn register(
        &self,
        correlation_id: Option<&str>,
        key: &str,
        bundle: ParamBundle,
    ) -> BackendResult<()>;

    /// The first bundle registered under `key`
    async fn resolve_one(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> BackendResult<Option<ParamBundle>>;

    /// All bundles registered under `key`, in registration order
    async fn resolve_all(
        &self,
        correlation_id: Option<&str>,
        key: &str,
    ) -> BackendResult<Vec<ParamBundle>>;
}
