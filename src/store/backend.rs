//! Cache store backend implementations.

use super::key::RequestKey;
use crate::types::StoredResponse;
use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Contract for a set of named cache containers.
///
/// Containers are created lazily by the first `put`; a read never creates
/// one. All operations are idempotent under repeated identical input. The
/// per-key write is atomic at the backend level (last-writer-wins); callers
/// must only store successful responses.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, container: &str, key: &RequestKey) -> Result<Option<StoredResponse>>;
    async fn put(&self, container: &str, key: RequestKey, response: StoredResponse) -> Result<()>;
    async fn delete_container(&self, name: &str) -> Result<bool>;
    async fn container_names(&self) -> Result<Vec<String>>;
    async fn clear(&self) -> Result<()>;
    fn name(&self) -> &'static str;
}

type Container = HashMap<RequestKey, StoredResponse>;

pub struct MemoryStore {
    containers: Arc<RwLock<HashMap<String, Container>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            containers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, container: &str, key: &RequestKey) -> Result<Option<StoredResponse>> {
        let containers = self.containers.read().unwrap();
        Ok(containers
            .get(container)
            .and_then(|entries| entries.get(key))
            .cloned())
    }

    async fn put(&self, container: &str, key: RequestKey, response: StoredResponse) -> Result<()> {
        debug_assert!(response.is_success(), "only successful responses are cacheable");
        let mut containers = self.containers.write().unwrap();
        containers
            .entry(container.to_string())
            .or_default()
            .insert(key, response);
        Ok(())
    }

    async fn delete_container(&self, name: &str) -> Result<bool> {
        Ok(self.containers.write().unwrap().remove(name).is_some())
    }

    async fn container_names(&self) -> Result<Vec<String>> {
        Ok(self.containers.read().unwrap().keys().cloned().collect())
    }

    async fn clear(&self) -> Result<()> {
        self.containers.write().unwrap().clear();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// No-op store used when caching is disabled: reads always miss, writes are
/// dropped, and no container is ever reported as existing.
pub struct NullStore;

impl NullStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for NullStore {
    async fn get(&self, _: &str, _: &RequestKey) -> Result<Option<StoredResponse>> {
        Ok(None)
    }
    async fn put(&self, _: &str, _: RequestKey, _: StoredResponse) -> Result<()> {
        Ok(())
    }
    async fn delete_container(&self, _: &str) -> Result<bool> {
        Ok(false)
    }
    async fn container_names(&self) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
    async fn clear(&self) -> Result<()> {
        Ok(())
    }
    fn name(&self) -> &'static str {
        "null"
    }
}
