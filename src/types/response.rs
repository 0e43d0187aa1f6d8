//! Stored HTTP responses.

use bytes::Bytes;
use std::collections::HashMap;
use std::time::SystemTime;

/// A response as held by a cache container, or as returned live from the
/// network. The body is opaque to the cache layer.
#[derive(Debug, Clone)]
pub struct StoredResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
    pub captured_at: SystemTime,
}

impl StoredResponse {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            captured_at: SystemTime::now(),
        }
    }

    /// Convenience constructor for a 200 response with no headers.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, HashMap::new(), body.into())
    }

    /// Only successful responses may be written to a cache container.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_covers_the_2xx_range_only() {
        assert!(StoredResponse::new(200, HashMap::new(), Bytes::new()).is_success());
        assert!(StoredResponse::new(204, HashMap::new(), Bytes::new()).is_success());
        assert!(!StoredResponse::new(304, HashMap::new(), Bytes::new()).is_success());
        assert!(!StoredResponse::new(404, HashMap::new(), Bytes::new()).is_success());
        assert!(!StoredResponse::new(500, HashMap::new(), Bytes::new()).is_success());
    }
}
