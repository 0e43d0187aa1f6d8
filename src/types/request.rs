//! Intercepted request records.

use crate::Result;
use std::collections::HashMap;
use url::Url;

/// Whether a request loads a full page or a sub-resource.
///
/// The offline fallback document is only ever served for [`Navigate`]
/// requests; sub-resource failures surface to the caller instead.
///
/// [`Navigate`]: RequestMode::Navigate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Navigate,
    Subresource,
}

/// One intercepted outbound request. Immutable once issued.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    /// Uppercase HTTP method. Only `GET` is eligible for cache interaction.
    pub method: String,
    pub url: Url,
    pub headers: HashMap<String, String>,
    pub mode: RequestMode,
}

impl RequestRecord {
    /// Create a new request with an arbitrary method.
    pub fn new(method: impl Into<String>, url: &str) -> Result<Self> {
        let method: String = method.into();
        Ok(Self {
            method: method.to_uppercase(),
            url: Url::parse(url)?,
            headers: HashMap::new(),
            mode: RequestMode::Subresource,
        })
    }

    /// Create a GET sub-resource request.
    pub fn get(url: &str) -> Result<Self> {
        Self::new("GET", url)
    }

    /// Create a GET full-page navigation request.
    pub fn navigate(url: &str) -> Result<Self> {
        let mut req = Self::new("GET", url)?;
        req.mode = RequestMode::Navigate;
        Ok(req)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }

    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }

    /// Whether the URL uses a scheme the cache layer handles at all.
    /// Extension-internal and other non-HTTP(S) schemes pass through
    /// untouched and never reach the classifier.
    pub fn is_http(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn methods_are_normalized_to_uppercase() {
        let req = RequestRecord::new("post", "https://example.com/upload").unwrap();
        assert_eq!(req.method, "POST");
        assert!(!req.is_get());
    }

    #[test]
    fn navigation_mode_is_explicit() {
        let page = RequestRecord::navigate("https://example.com/").unwrap();
        let asset = RequestRecord::get("https://example.com/app.js").unwrap();
        assert!(page.is_navigation());
        assert!(!asset.is_navigation());
    }

    #[test]
    fn non_http_schemes_are_detected() {
        let req = RequestRecord::get("chrome-extension://abcdef/popup.html").unwrap();
        assert!(!req.is_http());
        assert!(RequestRecord::get("https://example.com/").unwrap().is_http());
    }
}
