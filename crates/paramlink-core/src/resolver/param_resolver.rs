//! Two-pass resolution of connection and credential parameters
//!
//! Checks bundles in priority order:
//! 1. Self-contained bundles, in declaration order
//! 2. Indirect bundles, resolved through matching backends in `References`

use std::sync::Arc;

use crate::config::ConfigParams;
use crate::discovery::Backend;
use crate::logging::{NoOpLogger, SharedLogger};
use crate::params::{ParamBundle, ParamKind};
use crate::refer::References;
use crate::{log_debug, log_warn};
use super::error::{ResolveError, ResolveResult};

/// Resolves the parameters a component needs to reach a dependency
///
/// Holds the bundles declared in configuration plus, optionally, the
/// `References` used to locate backends. Setup (`configure`, `add`,
/// `set_references`) needs `&mut self`; lookups only need `&self`, so a
/// configured resolver can be shared behind an `Arc` by concurrent callers.
///
/// Self-contained bundles always win over indirect ones, wherever they are
/// declared: local parameters are never shadowed by a backend call.
///
/// # Example
///
/// ```rust,ignore
/// use paramlink_core::config::ConfigParams;
/// use paramlink_core::resolver::ParamResolver;
///
/// let mut resolver = ParamResolver::credentials();
/// resolver.configure(&ConfigParams::from_tuples([
///     ("credential.user", "jdoe"),
///     ("credential.pass", "pass123"),
/// ]));
/// resolver.set_references(references);
///
/// let credential = resolver.lookup(Some("123")).await?;
/// ```
pub struct ParamResolver {
    kind: ParamKind,
    bundles: Vec<ParamBundle>,
    references: Option<Arc<References>>,
    logger: SharedLogger,
}

impl ParamResolver {
    /// Create an empty resolver for `kind`
    pub fn new(kind: ParamKind) -> Self {
        Self {
            kind,
            bundles: Vec::new(),
            references: None,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Resolver for connection parameters (`connection` / `connections`, `discovery_key`)
    pub fn connections() -> Self {
        Self::new(ParamKind::Connection)
    }

    /// Resolver for credential parameters (`credential` / `credentials`, `store_key`)
    pub fn credentials() -> Self {
        Self::new(ParamKind::Credential)
    }

    /// Configure (builder style)
    pub fn with_config(mut self, config: &ConfigParams) -> Self {
        self.configure(config);
        self
    }

    /// Set references (builder style)
    pub fn with_references(mut self, references: Arc<References>) -> Self {
        self.set_references(references);
        self
    }

    /// Set the logger
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    /// Append the bundles declared in `config`
    ///
    /// Falls back to the whole config as one bundle when it has neither the
    /// singular nor the pluralized section. May be called repeatedly; bundles
    /// accumulate.
    pub fn configure(&mut self, config: &ConfigParams) {
        self.configure_with(config, true);
    }

    /// Append the bundles declared in `config`, choosing the whole-config fallback
    pub fn configure_with(&mut self, config: &ConfigParams, config_as_default: bool) {
        let bundles = ParamBundle::many_from_config(self.kind, config, config_as_default);
        log_debug!(
            self.logger,
            None,
            "[ParamResolver] Configured {} {} bundle(s)",
            bundles.len(),
            self.kind
        );
        self.bundles.extend(bundles);
    }

    /// Set the references used to locate backends, replacing any previous ones
    pub fn set_references(&mut self, references: Arc<References>) {
        self.references = Some(references);
    }

    pub fn references(&self) -> Option<&Arc<References>> {
        self.references.as_ref()
    }

    /// Append a single bundle
    ///
    /// A bundle of the other kind is re-tagged with this resolver's kind, so
    /// only this kind's reference key makes it indirect.
    pub fn add(&mut self, bundle: ParamBundle) {
        if bundle.kind() != self.kind {
            log_debug!(
                self.logger,
                None,
                "[ParamResolver] Re-tagging {} bundle as {}",
                bundle.kind(),
                self.kind
            );
        }
        self.bundles.push(bundle.into_kind(self.kind));
    }

    /// All configured bundles in declaration order, without any backend resolution
    ///
    /// Use `lookup` to get fully resolved parameters.
    pub fn get_all(&self) -> &[ParamBundle] {
        &self.bundles
    }

    /// Backends for this kind, or `None` when no references are set
    fn find_backends(
        &self,
        correlation_id: Option<&str>,
    ) -> ResolveResult<Option<Vec<Arc<dyn Backend>>>> {
        let Some(references) = &self.references else {
            return Ok(None);
        };

        let pattern = self.kind.backend_descriptor();
        let backends = references.get_backends(&pattern);
        if backends.is_empty() {
            log_warn!(
                self.logger,
                correlation_id,
                "[ParamResolver] No backend matching {} is registered",
                pattern
            );
            return Err(ResolveError::reference_missing(correlation_id, pattern));
        }
        Ok(Some(backends))
    }

    async fn lookup_in_backends(
        &self,
        correlation_id: Option<&str>,
        bundle: &ParamBundle,
    ) -> ResolveResult<Option<ParamBundle>> {
        let Some(key) = bundle.backend_key() else {
            return Ok(None);
        };

        let Some(backends) = self.find_backends(correlation_id)? else {
            log_debug!(
                self.logger,
                correlation_id,
                "[ParamResolver] No references set, skipping key '{}'",
                key
            );
            return Ok(None);
        };

        for backend in &backends {
            if let Some(resolved) = backend.resolve_one(correlation_id, key).await? {
                log_debug!(
                    self.logger,
                    correlation_id,
                    "[ParamResolver] Resolved key '{}' via {}",
                    key,
                    backend.name()
                );
                return Ok(Some(resolved));
            }
            log_debug!(
                self.logger,
                correlation_id,
                "[ParamResolver] Key '{}' not found in {}",
                key,
                backend.name()
            );
        }

        Ok(None)
    }

    /// Resolve one set of parameters
    ///
    /// Returns the first self-contained bundle if there is one. Otherwise
    /// each indirect bundle is resolved in turn through the backends
    /// registered in `References`, and the first hit is returned.
    ///
    /// `Ok(None)` means nothing was found, including when indirect bundles
    /// exist but no references were set. Fails with
    /// `ResolveError::ReferenceMissing` when references are set but hold no
    /// backend for this kind, and passes backend errors through.
    pub async fn lookup(&self, correlation_id: Option<&str>) -> ResolveResult<Option<ParamBundle>> {
        if self.bundles.is_empty() {
            return Ok(None);
        }

        // Parameters that don't require a backend
        if let Some(bundle) = self.bundles.iter().find(|b| !b.uses_backend()) {
            return Ok(Some(bundle.clone()));
        }

        // Parameters that do
        for bundle in self.bundles.iter().filter(|b| b.uses_backend()) {
            if let Some(resolved) = self.lookup_in_backends(correlation_id, bundle).await? {
                return Ok(Some(resolved));
            }
        }

        log_debug!(
            self.logger,
            correlation_id,
            "[ParamResolver] No {} parameters resolved",
            self.kind
        );
        Ok(None)
    }

    /// Resolve every set of parameters
    ///
    /// Self-contained bundles come first, followed by everything each
    /// matching backend returns for each indirect bundle.
    pub async fn resolve_all(&self, correlation_id: Option<&str>) -> ResolveResult<Vec<ParamBundle>> {
        let (indirect, literal): (Vec<&ParamBundle>, Vec<&ParamBundle>) =
            self.bundles.iter().partition(|b| b.uses_backend());
        let mut resolved: Vec<ParamBundle> = literal.into_iter().cloned().collect();

        for bundle in indirect {
            let Some(key) = bundle.backend_key() else {
                continue;
            };
            let Some(backends) = self.find_backends(correlation_id)? else {
                continue;
            };
            for backend in &backends {
                resolved.extend(backend.resolve_all(correlation_id, key).await?);
            }
        }

        Ok(resolved)
    }

    /// Register an indirect bundle in every matching backend
    ///
    /// Returns `false` without contacting anything when the bundle is
    /// self-contained or no references are set.
    pub async fn register(
        &self,
        correlation_id: Option<&str>,
        bundle: &ParamBundle,
    ) -> ResolveResult<bool> {
        let Some(key) = bundle.backend_key() else {
            return Ok(false);
        };
        let Some(references) = &self.references else {
            return Ok(false);
        };

        let mut registered = false;
        for backend in references.get_backends(&self.kind.backend_descriptor()) {
            backend.register(correlation_id, key, bundle.clone()).await?;
            registered = true;
        }
        Ok(registered)
    }
}

impl std::fmt::Debug for ParamResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParamResolver")
            .field("kind", &self.kind)
            .field("bundles", &self.bundles)
            .field("references", &self.references.is_some())
            .finish()
    }
}
