//! 缓存容器模块：以命名、带版本标签的容器保存请求到响应的映射。
//!
//! # Cache Store Module
//!
//! This module provides the named, versioned key/value containers that hold
//! cached responses, with pluggable backends behind the [`CacheStore`] trait.
//!
//! ## Overview
//!
//! A container maps a request key (method + absolute URL) to a stored
//! response. Containers are created lazily on the first write, enumerated at
//! activation time, and destroyed only by the lifecycle manager's sweep -
//! never by the policy engine.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`CacheStore`] | Trait for implementing container-set backends |
//! | [`MemoryStore`] | In-memory backend with per-key last-writer-wins writes |
//! | [`NullStore`] | No-op backend used when caching is disabled |
//! | [`RequestKey`] | Cache key derived from request method and URL |
//!
//! ## Example
//!
//! ```rust
//! use asset_cache_rust::store::{CacheStore, MemoryStore, RequestKey};
//! use asset_cache_rust::types::StoredResponse;
//!
//! # async fn demo() -> asset_cache_rust::Result<()> {
//! let store = MemoryStore::new();
//! let key = RequestKey::get("https://example.com/style.css");
//! store.put("static-v1", key.clone(), StoredResponse::ok("body { }")).await?;
//! assert!(store.get("static-v1", &key).await?.is_some());
//! # Ok(())
//! # }
//! ```

mod backend;
mod key;

pub use backend::{CacheStore, MemoryStore, NullStore};
pub use key::RequestKey;
