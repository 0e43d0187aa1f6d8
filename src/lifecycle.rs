//! Install / activate lifecycle and cache control messages.
//!
//! The lifecycle manager owns cache versioning. Install pre-populates the
//! current-version static container from the precache manifest; activation
//! sweeps every container belonging to neither the current version nor the
//! version-independent model cache. Phases run to completion before
//! steady-state traffic is accepted; the hosting runtime enforces that
//! ordering, so out-of-order calls here are logged rather than rejected.

use crate::config::RuntimeConfig;
use crate::store::{CacheStore, RequestKey};
use crate::transport::Fetcher;
use crate::types::RequestRecord;
use crate::{Error, Result};
use std::sync::{Arc, Mutex};
use url::Url;

/// Lifecycle phases, one-directional: `Parked -> Installed -> Active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parked,
    Installed,
    Active,
}

/// Control messages from the hosting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMessage {
    /// Force immediate activation.
    SkipWaiting,
    /// Delete every container unconditionally, regardless of version.
    ClearCache,
}

pub struct LifecycleManager {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
    static_container: String,
    model_container: String,
    manifest: Vec<Url>,
    phase: Mutex<Phase>,
}

impl LifecycleManager {
    pub fn new(
        store: Arc<dyn CacheStore>,
        fetcher: Arc<dyn Fetcher>,
        config: &RuntimeConfig,
    ) -> Result<Self> {
        let manifest = config
            .precache_manifest
            .iter()
            .map(|url| Url::parse(url))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            store,
            fetcher,
            static_container: config.static_container(),
            model_container: config.model_container.clone(),
            manifest,
            phase: Mutex::new(Phase::Parked),
        })
    }

    pub fn phase(&self) -> Phase {
        *self.phase.lock().unwrap()
    }

    /// Fetch and store every manifest URL into the current-version static
    /// container, always from the network. Any failure fails the whole
    /// phase: install signals failure upward instead of continuing with a
    /// partial cache.
    pub async fn install(&self) -> Result<()> {
        {
            let phase = self.phase.lock().unwrap();
            if *phase != Phase::Parked {
                tracing::warn!(phase = ?*phase, "install requested outside a fresh deployment");
            }
        }
        tracing::info!(
            container = %self.static_container,
            assets = self.manifest.len(),
            "installing: caching static assets"
        );
        let fetches = self.manifest.iter().map(|url| self.precache(url));
        futures::future::try_join_all(fetches).await?;
        *self.phase.lock().unwrap() = Phase::Installed;
        Ok(())
    }

    async fn precache(&self, url: &Url) -> Result<()> {
        // Always fetch fresh, never consulting prior entries: a partial or
        // corrupt earlier cache must not survive install.
        let request = RequestRecord::get(url.as_str())?;
        let response = self
            .fetcher
            .fetch(&request)
            .await
            .map_err(|e| Error::manifest(url.as_str(), e.to_string()))?;
        if !response.is_success() {
            return Err(Error::manifest(
                url.as_str(),
                format!("HTTP {}", response.status),
            ));
        }
        self.store
            .put(&self.static_container, RequestKey::for_url(url), response)
            .await
    }

    /// Delete every container that is neither the current-version static
    /// container nor the model container. Eviction on upgrade; the model
    /// cache survives deployments.
    pub async fn activate(&self) -> Result<()> {
        {
            let phase = self.phase.lock().unwrap();
            if *phase == Phase::Active {
                tracing::warn!("activate requested while already active");
            }
        }
        for name in self.store.container_names().await? {
            if name != self.static_container && name != self.model_container {
                tracing::info!(container = %name, "deleting old cache container");
                self.store.delete_container(&name).await?;
            }
        }
        *self.phase.lock().unwrap() = Phase::Active;
        Ok(())
    }

    pub async fn handle_message(&self, message: ControlMessage) -> Result<()> {
        match message {
            ControlMessage::SkipWaiting => {
                tracing::info!("skip-wait signal: activating immediately");
                self.activate().await
            }
            ControlMessage::ClearCache => {
                tracing::info!("clear-cache signal: deleting all containers");
                self.store.clear().await
            }
        }
    }
}
