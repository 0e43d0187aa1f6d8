//! URL classification.
//!
//! Every syntactically valid absolute HTTP(S) URL maps to exactly one
//! [`Classification`] - the function is pure, total and deterministic.
//! Construction of a [`Classifier`] is fallible (user-supplied patterns may
//! not compile); classification itself never errors.

use crate::config::ClassifierRules;
use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::RegexSet;
use url::Url;

/// Built-in bypass hosts: third-party API endpoints whose responses must
/// never be replayed from cache.
pub const DEFAULT_BYPASS_HOSTS: &[&str] = &["api.imgbb.com"];

/// Built-in model-asset patterns, matched against the full URL: binary model
/// weights, WASM inference modules, model manifests and the model-hosting
/// package path.
pub const DEFAULT_MODEL_PATTERNS: &[&str] = &[
    r"\.onnx$",
    r"\.wasm$",
    r"model.*\.json$",
    r"@imgly/background-removal",
];

static DEFAULT_PATTERN_SET: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(DEFAULT_MODEL_PATTERNS).expect("built-in model patterns must compile")
});

/// The three request classes the policy engine dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Large, content-stable inference asset: cache-first, version-independent.
    ModelAsset,
    /// Mutable page asset: network-first, stored under the current version.
    StaticAsset,
    /// Exempt from all caching; forwarded to the network unconditionally.
    Bypass,
}

/// Stateless URL classifier.
pub struct Classifier {
    bypass_hosts: Vec<String>,
    model_patterns: RegexSet,
}

impl Classifier {
    /// Build a classifier from configured rules. Fails if any model pattern
    /// is not a valid regex.
    pub fn from_rules(rules: &ClassifierRules) -> Result<Self> {
        let model_patterns = RegexSet::new(&rules.model_url_patterns)
            .map_err(|e| Error::config(format!("invalid model URL pattern: {e}")))?;
        Ok(Self {
            bypass_hosts: rules.bypass_hosts.clone(),
            model_patterns,
        })
    }

    /// Classify an absolute URL. Rules apply in priority order: bypass hosts
    /// win over model patterns, and everything else is a static asset.
    pub fn classify(&self, url: &Url) -> Classification {
        if let Some(host) = url.host_str() {
            if self.bypass_hosts.iter().any(|h| h == host) {
                return Classification::Bypass;
            }
        }
        if self.model_patterns.is_match(url.as_str()) {
            return Classification::ModelAsset;
        }
        Classification::StaticAsset
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            bypass_hosts: DEFAULT_BYPASS_HOSTS.iter().map(|s| s.to_string()).collect(),
            model_patterns: DEFAULT_PATTERN_SET.clone(),
        }
    }
}
