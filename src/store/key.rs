//! Cache key generation.

use crate::types::RequestRecord;
use serde::{Deserialize, Serialize};
use url::Url;

/// Identity of a cached entry: uppercase method plus absolute URL.
///
/// Two requests with the same method and URL always map to the same entry,
/// regardless of headers. URL fragments are not part of the identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestKey {
    method: String,
    url: String,
}

impl RequestKey {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        let method: String = method.into();
        Self {
            method: method.to_uppercase(),
            url: url.into(),
        }
    }

    /// Key for a GET of the given URL string.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn for_url(url: &Url) -> Self {
        let mut url = url.clone();
        url.set_fragment(None);
        Self::new("GET", String::from(url))
    }

    pub fn for_request(request: &RequestRecord) -> Self {
        let mut url = request.url.clone();
        url.set_fragment(None);
        Self::new(request.method.clone(), String::from(url))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl std::fmt::Display for RequestKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.url)
    }
}
