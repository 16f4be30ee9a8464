//! In-memory parameter backend

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::config::ConfigParams;
use crate::params::{ParamBundle, ParamKind};
use crate::refer::Component;
use super::traits::{Backend, BackendResult};

/// In-memory backend for testing and single-process deployments
///
/// Bundles are kept per key in registration order and are lost when the
/// backend is dropped.
///
/// # Thread Safety
///
/// The backend uses `RwLock` internally and is safe to share between tasks.
/// No lock is held across an await point.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    name: Option<String>,
    items: RwLock<IndexMap<String, Vec<ParamBundle>>>,
}

impl MemoryBackend {
    /// Create a new empty memory backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty backend that reports a custom name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            items: RwLock::new(IndexMap::new()),
        }
    }

    /// Create a backend pre-populated from configuration
    ///
    /// Each top-level section is a key and its values form one bundle:
    /// `db.host=db1` registers `{host: db1}` under `db`. A plain
    /// `db=host=db1;port=5432` entry is parsed as a parameter string.
    pub fn from_config(kind: ParamKind, config: &ConfigParams) -> Self {
        let backend = Self::new();
        backend.configure(kind, config);
        backend
    }

    /// Add every key declared in `config` (see `from_config`)
    pub fn configure(&self, kind: ParamKind, config: &ConfigParams) {
        for key in config.get_section_names() {
            let section = config.get_section(&key);
            let values = if section.is_empty() {
                match config.get(&key) {
                    Some(line) => ConfigParams::from_string(line),
                    None => continue,
                }
            } else {
                section
            };
            if values.is_empty() {
                continue;
            }
            self.register_sync(&key, ParamBundle::with_values(kind, values));
        }
    }

    /// Register a bundle synchronously (useful for initialization)
    pub fn register_sync(&self, key: &str, bundle: ParamBundle) {
        self.items
            .write()
            .entry(key.to_string())
            .or_default()
            .push(bundle);
    }

    /// Remove every bundle registered under `key`
    pub fn remove(&self, key: &str) -> Vec<ParamBundle> {
        self.items.write().shift_remove(key).unwrap_or_default()
    }

    /// Clear all bundles
    pub fn clear(&self) {
        self.items.write().clear();
    }

    /// Registered keys, in order of first registration
    pub fn keys(&self) -> Vec<String> {
        self.items.read().keys().cloned().collect()
    }

    /// Number of keys with at least one bundle
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("memory")
    }

    async fn register(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
        bundle: ParamBundle,
    ) -> BackendResult<()> {
        self.register_sync(key, bundle);
        Ok(())
    }

    async fn resolve_one(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
    ) -> BackendResult<Option<ParamBundle>> {
        Ok(self.items.read().get(key).and_then(|bundles| bundles.first().cloned()))
    }

    async fn resolve_all(
        &self,
        _correlation_id: Option<&str>,
        key: &str,
    ) -> BackendResult<Vec<ParamBundle>> {
        Ok(self.items.read().get(key).cloned().unwrap_or_default())
    }
}

impl Component for MemoryBackend {
    fn component_name(&self) -> &str {
        Backend::name(self)
    }

    fn as_backend(self: Arc<Self>) -> Option<Arc<dyn Backend>> {
        Some(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_then_resolve_one() {
        let backend = MemoryBackend::new();
        let bundle = ParamBundle::connection([("host", "db1"), ("port", "5432")]);

        backend.register(Some("123"), "db", bundle.clone()).await.unwrap();

        assert_eq!(backend.resolve_one(Some("123"), "db").await.unwrap(), Some(bundle));
        assert_eq!(backend.resolve_one(None, "unknown").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_registrations_accumulate_in_order() {
        let backend = MemoryBackend::new();
        let first = ParamBundle::connection([("host", "db1")]);
        let second = ParamBundle::connection([("host", "db2")]);

        backend.register(None, "db", first.clone()).await.unwrap();
        backend.register(None, "db", second.clone()).await.unwrap();

        assert_eq!(backend.resolve_all(None, "db").await.unwrap(), vec![first.clone(), second]);
        // resolve_one keeps returning the first registration
        assert_eq!(backend.resolve_one(None, "db").await.unwrap(), Some(first));
        assert_eq!(backend.len(), 1);
        assert!(backend.resolve_all(None, "other").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = ConfigParams::from_tuples([
            ("primary.host", "db1"),
            ("primary.port", "5432"),
            ("replica", "host=db2;port=5433"),
        ]);
        let backend = MemoryBackend::from_config(ParamKind::Connection, &config);

        assert_eq!(backend.keys(), vec!["primary", "replica"]);

        let primary = backend.resolve_one(None, "primary").await.unwrap().unwrap();
        assert_eq!(primary.host(), Some("db1"));
        assert_eq!(primary.port(), Some(5432));
        assert_eq!(primary.kind(), ParamKind::Connection);

        let replica = backend.resolve_one(None, "replica").await.unwrap().unwrap();
        assert_eq!(replica.host(), Some("db2"));
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let backend = MemoryBackend::new();
        backend.register_sync("a", ParamBundle::credential([("user", "a")]));
        backend.register_sync("b", ParamBundle::credential([("user", "b")]));

        assert_eq!(backend.remove("a").len(), 1);
        assert!(backend.resolve_one(None, "a").await.unwrap().is_none());
        assert!(backend.remove("a").is_empty());

        backend.clear();
        assert!(backend.is_empty());
    }

    #[test]
    fn test_names() {
        assert_eq!(MemoryBackend::new().name(), "memory");
        let named = MemoryBackend::named("vault-cache");
        assert_eq!(named.component_name(), "vault-cache");
        assert!(Arc::new(named).as_backend().is_some());
    }

    #[tokio::test]
    async fn test_concurrent_registration() {
        let backend = Arc::new(MemoryBackend::new());
        let mut handles = vec![];

        for i in 0..10 {
            let backend = Arc::clone(&backend);
            handles.push(tokio::spawn(async move {
                let key = format!("key_{}", i);
                let bundle = ParamBundle::credential([("user", format!("user_{}", i))]);
                backend.register(None, &key, bundle.clone()).await.unwrap();
                assert_eq!(backend.resolve_one(None, &key).await.unwrap(), Some(bundle));
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(backend.len(), 10);
    }
}
