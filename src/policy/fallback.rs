//! Offline fallback document.

use crate::store::{CacheStore, RequestKey};
use crate::types::{RequestRecord, StoredResponse};
use crate::Result;
use url::Url;

/// Serves the designated offline document for failed navigation requests.
///
/// Sub-resource failures never receive the fallback document; the policy
/// engine surfaces those to the caller.
pub struct OfflineFallback {
    document: Option<Url>,
    container: String,
}

impl OfflineFallback {
    pub fn new(document: Option<Url>, container: impl Into<String>) -> Self {
        Self {
            document,
            container: container.into(),
        }
    }

    /// The cached offline document, if `request` is a navigation and the
    /// document was cached at install time. Absent otherwise.
    pub async fn fallback_for(
        &self,
        store: &dyn CacheStore,
        request: &RequestRecord,
    ) -> Result<Option<StoredResponse>> {
        if !request.is_navigation() {
            return Ok(None);
        }
        let Some(ref document) = self.document else {
            return Ok(None);
        };
        store.get(&self.container, &RequestKey::for_url(document)).await
    }
}
