use crate::transport::TransportError;
use thiserror::Error;

/// Unified error type for the asset cache runtime.
/// This aggregates all low-level errors into actionable, high-level categories.
#[derive(Debug, Error)]
pub enum Error {
    /// A manifest URL could not be fetched and stored during install.
    /// Fatal to the install phase: the caller must report initialization
    /// failure rather than continue with a partial cache.
    #[error("manifest fetch failed for {url}: {reason}")]
    Manifest { url: String, reason: String },

    /// The network transport itself failed (offline, DNS failure, refused
    /// connection, timeout). Recoverable for static assets via cache
    /// fallback; propagated for model assets, which have no fallback.
    #[error("network transport error: {0}")]
    Transport(#[from] TransportError),

    /// A cache backend rejected a read or write. Opportunistic writes are
    /// logged and swallowed by the policy engine and never fail the
    /// user-visible response.
    #[error("cache store error: {message}")]
    Store { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a new store error.
    pub fn store(message: impl Into<String>) -> Self {
        Error::Store {
            message: message.into(),
        }
    }

    /// Create a new configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Create a new manifest error for the given URL.
    pub fn manifest(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Manifest {
            url: url.into(),
            reason: reason.into(),
        }
    }
}
