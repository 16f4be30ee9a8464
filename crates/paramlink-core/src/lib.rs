//! Paramlink Core
//!
//! Resolves the parameters a component needs to reach an external dependency:
//! connection endpoints and access credentials. Parameters come either from
//! local configuration or from backends (discovery services, credential
//! stores) located through a capability-based component registry.
//!
//! ## Resolution
//!
//! A `ParamResolver` holds the bundles declared in configuration. A lookup
//! returns the first self-contained bundle; only when there is none does it
//! ask the registered backends for each `store_key` / `discovery_key` in turn:
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use paramlink_core::{ConfigParams, Descriptor, MemoryBackend, ParamKind, ParamResolver, References};
//!
//! let store = MemoryBackend::from_config(
//!     ParamKind::Credential,
//!     &ConfigParams::from_tuples([("db.user", "jdoe"), ("db.pass", "pass123")]),
//! );
//! let references = Arc::new(References::new());
//! references.put(Descriptor::new("myapp", "credential_store", "memory", "default", "1.0"), Arc::new(store));
//!
//! let resolver = ParamResolver::credentials()
//!     .with_config(&ConfigParams::from_tuples([("credential.store_key", "db")]))
//!     .with_references(references);
//!
//! let credential = resolver.lookup(Some("123")).await?.expect("configured");
//! assert_eq!(credential.username(), Some("jdoe"));
//! ```

pub mod config;
pub mod params;
pub mod refer;
pub mod discovery;
pub mod logging;
pub mod resolver;

// Re-export commonly used types
pub use config::{ConfigParams, ConfigError, ConfigResult, FileConfigReader, ConfigFormat};

pub use params::{ParamBundle, ParamKind};

pub use refer::{Component, Descriptor, Reference, References, ReferenceError, ReferenceResult};

pub use discovery::{Backend, BackendError, BackendResult, MemoryBackend};

pub use logging::{Logger, LoggerExt, LogLevel, SharedLogger, NoOpLogger, ConsoleLogger, TracingLogger};

pub use resolver::{ParamResolver, ResolveError, ResolveResult};
