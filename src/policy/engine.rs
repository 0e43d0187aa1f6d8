//! The dual-strategy policy engine.

use super::fallback::OfflineFallback;
use crate::classify::{Classification, Classifier};
use crate::config::RuntimeConfig;
use crate::store::{CacheStore, RequestKey};
use crate::types::{RequestRecord, StoredResponse};
use crate::transport::Fetcher;
use crate::Result;
use std::sync::Arc;
use url::Url;

/// Where the bytes of a handled request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseSource {
    Network,
    Cache,
    Fallback,
}

/// A handled request: the response plus which path served it.
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub response: StoredResponse,
    pub source: ResponseSource,
}

/// Selects and executes a caching strategy per classified request.
///
/// The engine owns no lifecycle state: it reads and writes containers but
/// never creates or deletes them, except through `put`'s lazy creation. Each
/// container is only ever written under its designated strategy.
pub struct PolicyEngine {
    store: Arc<dyn CacheStore>,
    fetcher: Arc<dyn Fetcher>,
    classifier: Classifier,
    static_container: String,
    model_container: String,
    fallback: OfflineFallback,
}

impl PolicyEngine {
    pub fn new(
        store: Arc<dyn CacheStore>,
        fetcher: Arc<dyn Fetcher>,
        config: &RuntimeConfig,
    ) -> Result<Self> {
        let classifier = Classifier::from_rules(&config.classifier)?;
        let document = config
            .offline_document
            .as_deref()
            .map(Url::parse)
            .transpose()?;
        let static_container = config.static_container();
        Ok(Self {
            fallback: OfflineFallback::new(document, static_container.clone()),
            store,
            fetcher,
            classifier,
            static_container,
            model_container: config.model_container.clone(),
        })
    }

    /// Handle one intercepted request. Non-GET methods and non-HTTP(S)
    /// schemes are forwarded untouched.
    pub async fn handle(&self, request: &RequestRecord) -> Result<FetchOutcome> {
        if !request.is_get() || !request.is_http() {
            return self.forward(request).await;
        }
        match self.classifier.classify(&request.url) {
            Classification::Bypass => {
                tracing::debug!(url = %request.url, "bypassing cache");
                self.forward(request).await
            }
            Classification::ModelAsset => self.cache_first(request).await,
            Classification::StaticAsset => self.network_first(request).await,
        }
    }

    /// Unconditional network forward; the response is returned unmodified
    /// and no container is read or written.
    async fn forward(&self, request: &RequestRecord) -> Result<FetchOutcome> {
        let response = self.fetcher.fetch(request).await?;
        Ok(FetchOutcome {
            response,
            source: ResponseSource::Network,
        })
    }

    /// Cache-first with refill, for model assets. A hit is served without any
    /// network call. Transport failure with no cached entry propagates:
    /// model assets have no further fallback.
    async fn cache_first(&self, request: &RequestRecord) -> Result<FetchOutcome> {
        let key = RequestKey::for_request(request);
        if let Some(cached) = self.store.get(&self.model_container, &key).await? {
            tracing::debug!(url = %request.url, "serving model from cache");
            return Ok(FetchOutcome {
                response: cached,
                source: ResponseSource::Cache,
            });
        }

        tracing::debug!(url = %request.url, "fetching model");
        let response = self.fetcher.fetch(request).await?;
        if response.is_success() {
            self.put_opportunistic(&self.model_container, key, &response)
                .await;
        }
        Ok(FetchOutcome {
            response,
            source: ResponseSource::Network,
        })
    }

    /// Network-first with cache fallback, for static assets. The live
    /// response always wins when the transport succeeds, and 2xx responses
    /// are written through to the current-version container.
    async fn network_first(&self, request: &RequestRecord) -> Result<FetchOutcome> {
        let key = RequestKey::for_request(request);
        match self.fetcher.fetch(request).await {
            Ok(response) => {
                if response.is_success() {
                    self.put_opportunistic(&self.static_container, key, &response)
                        .await;
                }
                Ok(FetchOutcome {
                    response,
                    source: ResponseSource::Network,
                })
            }
            Err(err) => {
                if let Some(cached) = self.store.get(&self.static_container, &key).await? {
                    tracing::debug!(url = %request.url, "serving from cache (offline)");
                    return Ok(FetchOutcome {
                        response: cached,
                        source: ResponseSource::Cache,
                    });
                }
                if let Some(document) = self
                    .fallback
                    .fallback_for(self.store.as_ref(), request)
                    .await?
                {
                    tracing::debug!(url = %request.url, "serving offline document");
                    return Ok(FetchOutcome {
                        response: document,
                        source: ResponseSource::Fallback,
                    });
                }
                Err(err.into())
            }
        }
    }

    /// Opportunistic cache write: a failure must never fail the user-visible
    /// response, which the caller already holds.
    async fn put_opportunistic(&self, container: &str, key: RequestKey, response: &StoredResponse) {
        if let Err(err) = self.store.put(container, key, response.clone()).await {
            tracing::warn!(container, error = %err, "cache write failed; serving live response");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::transport::mock::MockFetcher;
    use crate::Error;

    const MODEL_URL: &str = "https://cdn.example.com/models/u2net.onnx";
    const PAGE_URL: &str = "https://example.com/index.html";
    const SCRIPT_URL: &str = "https://example.com/app.js";
    const UPLOAD_URL: &str = "https://api.imgbb.com/1/upload";

    fn config() -> RuntimeConfig {
        RuntimeConfig::new()
            .with_version("v1")
            .with_offline_document(PAGE_URL)
    }

    fn engine(store: Arc<MemoryStore>, fetcher: Arc<MockFetcher>) -> PolicyEngine {
        PolicyEngine::new(store, fetcher, &config()).unwrap()
    }

    #[tokio::test]
    async fn bypass_requests_never_touch_any_container() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new().ok(UPLOAD_URL, "{\"ok\":true}"));
        let engine = engine(store.clone(), fetcher.clone());

        let request = RequestRecord::get(UPLOAD_URL).unwrap();
        let outcome = engine.handle(&request).await.unwrap();

        assert_eq!(outcome.source, ResponseSource::Network);
        assert_eq!(outcome.response.body.as_ref(), b"{\"ok\":true}");
        assert!(store.container_names().await.unwrap().is_empty());
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn model_hit_never_triggers_a_network_fetch() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new().ok(MODEL_URL, "weights"));
        let engine = engine(store.clone(), fetcher.clone());
        let request = RequestRecord::get(MODEL_URL).unwrap();

        let miss = engine.handle(&request).await.unwrap();
        assert_eq!(miss.source, ResponseSource::Network);
        assert_eq!(fetcher.fetch_count(), 1);

        // Once present, the hot path stays off the network entirely.
        for _ in 0..3 {
            let hit = engine.handle(&request).await.unwrap();
            assert_eq!(hit.source, ResponseSource::Cache);
            assert_eq!(hit.response.body.as_ref(), b"weights");
        }
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn model_failure_with_no_cached_entry_propagates() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.set_offline(true);
        let engine = engine(store, fetcher);

        let request = RequestRecord::get(MODEL_URL).unwrap();
        let err = engine.handle(&request).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn static_assets_are_written_through() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new().ok(SCRIPT_URL, "console.log(1)"));
        let engine = engine(store.clone(), fetcher);

        let request = RequestRecord::get(SCRIPT_URL).unwrap();
        let outcome = engine.handle(&request).await.unwrap();
        assert_eq!(outcome.source, ResponseSource::Network);

        let cached = store
            .get("static-v1", &RequestKey::for_request(&request))
            .await
            .unwrap()
            .expect("write-through entry");
        assert_eq!(cached.body, outcome.response.body);
    }

    #[tokio::test]
    async fn static_fallback_serves_the_cached_copy_offline() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new().ok(SCRIPT_URL, "console.log(1)"));
        let engine = engine(store, fetcher.clone());
        let request = RequestRecord::get(SCRIPT_URL).unwrap();

        engine.handle(&request).await.unwrap();
        fetcher.set_offline(true);

        let outcome = engine.handle(&request).await.unwrap();
        assert_eq!(outcome.source, ResponseSource::Cache);
        assert_eq!(outcome.response.body.as_ref(), b"console.log(1)");
    }

    #[tokio::test]
    async fn offline_navigation_without_cache_gets_the_offline_document() {
        let store = Arc::new(MemoryStore::new());
        store
            .put(
                "static-v1",
                RequestKey::get(PAGE_URL),
                StoredResponse::ok("<html>offline</html>"),
            )
            .await
            .unwrap();
        let fetcher = Arc::new(MockFetcher::new());
        fetcher.set_offline(true);
        let engine = engine(store, fetcher);

        // A navigation to a page that was never cached.
        let nav = RequestRecord::navigate("https://example.com/gallery").unwrap();
        let outcome = engine.handle(&nav).await.unwrap();
        assert_eq!(outcome.source, ResponseSource::Fallback);
        assert_eq!(outcome.response.body.as_ref(), b"<html>offline</html>");

        // The same failure on a sub-resource surfaces the error instead.
        let sub = RequestRecord::get("https://example.com/gallery.js").unwrap();
        let err = engine.handle(&sub).await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[tokio::test]
    async fn non_get_methods_pass_through_untouched() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new().ok(SCRIPT_URL, "created"));
        let engine = engine(store.clone(), fetcher.clone());

        let request = RequestRecord::new("POST", SCRIPT_URL).unwrap();
        let outcome = engine.handle(&request).await.unwrap();
        assert_eq!(outcome.source, ResponseSource::Network);
        assert!(store.container_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_http_schemes_pass_through_untouched() {
        let store = Arc::new(MemoryStore::new());
        let fetcher = Arc::new(MockFetcher::new());
        let engine = engine(store.clone(), fetcher.clone());

        let request = RequestRecord::get("chrome-extension://abcdef/popup.html").unwrap();
        engine.handle(&request).await.unwrap();
        assert!(store.container_names().await.unwrap().is_empty());
        assert_eq!(fetcher.fetch_count(), 1);
    }

    #[tokio::test]
    async fn failed_statuses_are_returned_live_but_never_cached() {
        let store = Arc::new(MemoryStore::new());
        // Unscripted URLs respond 404 from the mock.
        let fetcher = Arc::new(MockFetcher::new());
        let engine = engine(store.clone(), fetcher);

        let request = RequestRecord::get("https://example.com/missing.css").unwrap();
        let outcome = engine.handle(&request).await.unwrap();
        assert_eq!(outcome.response.status, 404);
        assert!(store.container_names().await.unwrap().is_empty());
    }
}
