//! 策略引擎模块：按请求分类选择并执行两种缓存策略之一。
//!
//! # Policy Engine Module
//!
//! Routes every intercepted GET request through one of two caching
//! strategies, or forwards it untouched:
//!
//! | Class | Strategy |
//! |-------|----------|
//! | Model asset | Cache-first: a hit never touches the network; a miss is fetched and kept |
//! | Static asset | Network-first: the live response wins and is written through; the cache answers offline |
//! | Bypass | Unconditional network forward, no cache read or write |
//!
//! Side effects are confined to cache-store writes. A failed opportunistic
//! write is logged and swallowed; it never fails the user-visible response.

mod engine;
mod fallback;

pub use engine::{FetchOutcome, PolicyEngine, ResponseSource};
pub use fallback::OfflineFallback;
