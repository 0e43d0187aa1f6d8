//! Network fetch abstraction.
//!
//! The policy engine and lifecycle manager never talk to the network
//! directly; they go through the [`Fetcher`] trait. [`HttpFetcher`] is the
//! production implementation. A failed transport (offline, DNS failure,
//! refused connection, timeout) is a [`TransportError`]; a non-2xx response
//! is still a response and is reported as such.

mod http;

pub use http::HttpFetcher;

use crate::types::{RequestRecord, StoredResponse};
use async_trait::async_trait;

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &RequestRecord)
        -> std::result::Result<StoredResponse, TransportError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Other(String),
}
