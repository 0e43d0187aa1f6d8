//! Runtime configuration and loaders.
//!
//! Configuration is plain data: container naming, the precache manifest, the
//! offline fallback document and the classification rules. Configs load from
//! YAML (the usual deployment shape) or JSON, and are validated before the
//! runtime is built.

use crate::classify::{DEFAULT_BYPASS_HOSTS, DEFAULT_MODEL_PATTERNS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Classification rules consumed by [`crate::classify::Classifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Hosts exempt from all caching (third-party API endpoints).
    pub bypass_hosts: Vec<String>,
    /// Regex patterns, matched against the full URL, that mark a request as
    /// a model asset.
    pub model_url_patterns: Vec<String>,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            bypass_hosts: DEFAULT_BYPASS_HOSTS.iter().map(|s| s.to_string()).collect(),
            model_url_patterns: DEFAULT_MODEL_PATTERNS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Version tag of the current static-asset deployment. The static
    /// container is named `{static_container_prefix}-{version}`.
    pub version: String,
    pub static_container_prefix: String,
    /// The model container is deliberately not keyed by version: model
    /// payloads are content-stable and expensive to refetch, so they survive
    /// deployments. Entries are only ever replaced by key, never invalidated
    /// by content hash.
    pub model_container: String,
    /// Ordered absolute URLs of the static assets required by the current
    /// version, fetched and stored during install.
    pub precache_manifest: Vec<String>,
    /// URL of the document served for failed navigation requests. Should be
    /// part of `precache_manifest` so it is cached at install time.
    pub offline_document: Option<String>,
    /// When false the runtime swaps in a no-op store; every request behaves
    /// as a pass-through.
    pub enabled: bool,
    pub classifier: ClassifierRules,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            version: "v1".to_string(),
            static_container_prefix: "static".to_string(),
            model_container: "model-cache".to_string(),
            precache_manifest: Vec::new(),
            offline_document: None,
            enabled: true,
            classifier: ClassifierRules::default(),
        }
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_precache_manifest(mut self, urls: Vec<String>) -> Self {
        self.precache_manifest = urls;
        self
    }

    pub fn with_offline_document(mut self, url: impl Into<String>) -> Self {
        self.offline_document = Some(url.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Name of the static container for the configured version.
    pub fn static_container(&self) -> String {
        format!("{}-{}", self.static_container_prefix, self.version)
    }

    /// Load and validate a YAML config.
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&input)
    }

    /// Load and validate a JSON config.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.version.is_empty() {
            return Err(Error::config("version must not be empty"));
        }
        if self.static_container_prefix.is_empty() {
            return Err(Error::config("static_container_prefix must not be empty"));
        }
        if self.model_container.is_empty() {
            return Err(Error::config("model_container must not be empty"));
        }
        if self.model_container == self.static_container() {
            return Err(Error::config(
                "model_container must differ from the static container",
            ));
        }
        for url in &self.precache_manifest {
            require_absolute_http(url, "precache_manifest")?;
        }
        if let Some(ref url) = self.offline_document {
            require_absolute_http(url, "offline_document")?;
        }
        Ok(())
    }
}

fn require_absolute_http(url: &str, field: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::config(format!("{field}: {url:?} is not a valid URL: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::config(format!(
            "{field}: {url:?} must use an http(s) scheme"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RuntimeConfig::default().validate().unwrap();
    }

    #[test]
    fn static_container_combines_prefix_and_version() {
        let config = RuntimeConfig::new().with_version("v2.1.0");
        assert_eq!(config.static_container(), "static-v2.1.0");
    }

    #[test]
    fn yaml_loads_partial_documents() {
        let config = RuntimeConfig::from_yaml_str(
            r#"
version: "v1.0.1"
precache_manifest:
  - "https://example.com/index.html"
  - "https://example.com/style.css"
offline_document: "https://example.com/index.html"
"#,
        )
        .unwrap();
        assert_eq!(config.version, "v1.0.1");
        assert_eq!(config.precache_manifest.len(), 2);
        // Unspecified fields keep their defaults.
        assert_eq!(config.model_container, "model-cache");
        assert!(config.enabled);
    }

    #[test]
    fn json_loader_matches_yaml_loader() {
        let config =
            RuntimeConfig::from_json_str(r#"{"version": "v3", "enabled": false}"#).unwrap();
        assert_eq!(config.version, "v3");
        assert!(!config.enabled);
    }

    #[test]
    fn relative_manifest_urls_are_rejected() {
        let result = RuntimeConfig::from_yaml_str(
            r#"
precache_manifest:
  - "/index.html"
"#,
        );
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn non_http_offline_document_is_rejected() {
        let config = RuntimeConfig::new().with_offline_document("file:///index.html");
        assert!(config.validate().is_err());
    }

    #[test]
    fn model_container_must_not_collide_with_static() {
        let mut config = RuntimeConfig::new().with_version("v1");
        config.model_container = "static-v1".to_string();
        assert!(config.validate().is_err());
    }
}
