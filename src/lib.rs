//! # asset-cache-rust
//!
//! 离线优先的资源缓存运行时：拦截页面发出的 HTTP 请求，按双策略缓存并管理版本化的缓存生命周期。
//!
//! Offline-first asset cache runtime - a request interception layer that
//! decides, per request, whether to serve from a local cache, fetch fresh and
//! cache the result, or bypass caching entirely, and that keeps the cache set
//! consistent across deployments and offline conditions.
//!
//! ## Overview
//!
//! The runtime sits between a page (or any request-issuing collaborator) and
//! the network. Every outbound request is classified by URL shape and routed
//! through one of two caching strategies, or passed through untouched. The
//! layer does not understand response content; it operates purely on request
//! identity and response metadata.
//!
//! ## Core Behavior
//!
//! - **Cache-first** for large, content-stable model assets (inference model
//!   weights, WASM modules, model manifests): a cached entry is served without
//!   touching the network; a miss is fetched once and kept across deployments.
//! - **Network-first** for mutable page assets (markup, stylesheets, scripts):
//!   the live response wins when online and is written through to the
//!   current-version container; the cache answers when the network fails.
//! - **Bypass** for third-party API endpoints whose responses must never be
//!   replayed from cache.
//! - **Versioned lifecycle**: install pre-populates the static container from
//!   a manifest; activation sweeps every container that belongs to neither the
//!   current version nor the version-independent model cache.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use asset_cache_rust::{CacheRuntimeBuilder, RequestRecord, RuntimeConfig};
//!
//! #[tokio::main]
//! async fn main() -> asset_cache_rust::Result<()> {
//!     let config = RuntimeConfig::from_yaml_file("cache.yaml")?;
//!     let runtime = CacheRuntimeBuilder::new().with_config(config).build()?;
//!
//!     runtime.install().await?;
//!     runtime.activate().await?;
//!
//!     let request = RequestRecord::get("https://example.com/app.js")?;
//!     let outcome = runtime.handle_fetch(request).await?;
//!     println!("served {} bytes from {:?}", outcome.response.body.len(), outcome.source);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Request and stored-response records |
//! | [`classify`] | Pure URL classification into the three request classes |
//! | [`store`] | Named, versioned cache containers with pluggable backends |
//! | [`transport`] | Network fetch abstraction and the HTTP implementation |
//! | [`policy`] | The dual-strategy policy engine and offline fallback |
//! | [`lifecycle`] | Install / activate phases and cache control messages |
//! | [`config`] | Runtime configuration and loaders |
//! | [`runtime`] | The [`CacheRuntime`] facade tying everything together |

pub mod classify;
pub mod config;
pub mod lifecycle;
pub mod policy;
pub mod runtime;
pub mod store;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use classify::{Classification, Classifier};
pub use config::{ClassifierRules, RuntimeConfig};
pub use lifecycle::{ControlMessage, LifecycleManager, Phase};
pub use policy::{FetchOutcome, PolicyEngine, ResponseSource};
pub use runtime::{CacheRuntime, CacheRuntimeBuilder};
pub use store::{CacheStore, MemoryStore, NullStore, RequestKey};
pub use transport::{Fetcher, HttpFetcher};
pub use types::{RequestMode, RequestRecord, StoredResponse};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::Error;
