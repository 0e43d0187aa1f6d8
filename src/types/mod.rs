//! 类型模块：定义被拦截请求与已缓存响应的核心数据类型。
//!
//! # Types Module
//!
//! Core data types shared by every layer of the runtime: the record of an
//! intercepted request and the stored form of an HTTP response.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`RequestRecord`] | Method, absolute URL, headers and mode of one intercepted request |
//! | [`RequestMode`] | Whether the request loads a full page or a sub-resource |
//! | [`StoredResponse`] | Status, headers, body bytes and capture time of a response |
//!
//! Both records are ephemeral from the cache layer's point of view: a
//! [`RequestRecord`] is created and discarded per intercepted request, while a
//! [`StoredResponse`] either flows straight back to the caller or is written
//! into a cache container by the policy engine.

mod request;
mod response;

pub use request::{RequestMode, RequestRecord};
pub use response::StoredResponse;
