//! The [`CacheRuntime`] facade.
//!
//! One explicit context object owns every collaborator - store, fetcher,
//! policy engine, lifecycle manager and configuration - with no module-level
//! mutable state. Each intercepted request is handled as an independent
//! async task that suspends only at I/O boundaries; no ordering is
//! guaranteed between concurrent requests to different keys.

use crate::config::RuntimeConfig;
use crate::lifecycle::{ControlMessage, LifecycleManager, Phase};
use crate::policy::{FetchOutcome, PolicyEngine};
use crate::store::{CacheStore, MemoryStore, NullStore};
use crate::transport::{Fetcher, HttpFetcher};
use crate::types::RequestRecord;
use crate::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub struct CacheRuntime {
    config: RuntimeConfig,
    engine: PolicyEngine,
    lifecycle: LifecycleManager,
}

impl CacheRuntime {
    pub fn builder() -> CacheRuntimeBuilder {
        CacheRuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    /// Handle one intercepted request. Safe to call concurrently; concurrent
    /// misses on the same key may both fetch, with the later write winning.
    pub async fn handle_fetch(&self, request: RequestRecord) -> Result<FetchOutcome> {
        let span = tracing::debug_span!(
            "fetch",
            id = %Uuid::new_v4(),
            method = %request.method,
            url = %request.url,
        );
        self.engine.handle(&request).instrument(span).await
    }

    /// Run the install phase: pre-populate the static container.
    pub async fn install(&self) -> Result<()> {
        self.lifecycle.install().await
    }

    /// Run the activate phase: sweep stale containers.
    pub async fn activate(&self) -> Result<()> {
        self.lifecycle.activate().await
    }

    pub async fn handle_message(&self, message: ControlMessage) -> Result<()> {
        self.lifecycle.handle_message(message).await
    }
}

/// Builder for creating runtimes with custom configuration.
///
/// Keep this surface area small and predictable.
pub struct CacheRuntimeBuilder {
    config: Option<RuntimeConfig>,
    config_path: Option<PathBuf>,
    store: Option<Arc<dyn CacheStore>>,
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl CacheRuntimeBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            config_path: None,
            store: None,
            fetcher: None,
        }
    }

    pub fn with_config(mut self, config: RuntimeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from a YAML file at build time.
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    /// Substitute a cache store backend (defaults to [`MemoryStore`]).
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Substitute a fetcher (defaults to [`HttpFetcher`]; primarily for
    /// tests).
    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn build(self) -> Result<CacheRuntime> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => RuntimeConfig::from_yaml_file(path)?,
            (None, None) => RuntimeConfig::default(),
        };
        config.validate()?;

        // Disabled caching swaps in the no-op store: every request then
        // behaves as a pass-through, whatever store was supplied.
        let store: Arc<dyn CacheStore> = if !config.enabled {
            Arc::new(NullStore::new())
        } else {
            self.store.unwrap_or_else(|| Arc::new(MemoryStore::new()))
        };
        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new()?),
        };
        tracing::debug!(backend = store.name(), version = %config.version, "building cache runtime");

        let engine = PolicyEngine::new(store.clone(), fetcher.clone(), &config)?;
        let lifecycle = LifecycleManager::new(store, fetcher, &config)?;
        Ok(CacheRuntime {
            config,
            engine,
            lifecycle,
        })
    }
}

impl Default for CacheRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
