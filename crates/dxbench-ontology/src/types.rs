//! Ontology configuration and disease records.

use serde::{Deserialize, Serialize};

/// Orphadata client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntologyConfig {
    /// API base URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Language of returned terms and definitions.
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://api.orphadata.com".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_timeout() -> u64 {
    15
}

impl Default for OntologyConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            lang: default_lang(),
            timeout_secs: default_timeout(),
        }
    }
}

impl OntologyConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `DXBENCH_ORPHADATA_URL` | API base URL |
    /// | `DXBENCH_ORPHADATA_LANG` | Language code (default `en`) |
    /// | `DXBENCH_ORPHADATA_TIMEOUT` | Request timeout in seconds (default 15) |
    pub fn from_env() -> Self {
        Self {
            url: std::env::var("DXBENCH_ORPHADATA_URL").unwrap_or_else(|_| default_url()),
            lang: std::env::var("DXBENCH_ORPHADATA_LANG").unwrap_or_else(|_| default_lang()),
            timeout_secs: std::env::var("DXBENCH_ORPHADATA_TIMEOUT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(default_timeout),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the language; normalized to trimmed lowercase, empty means `en`.
    pub fn with_lang(mut self, lang: &str) -> Self {
        let lang = lang.trim().to_lowercase();
        self.lang = if lang.is_empty() { default_lang() } else { lang };
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// One Orphanet disease entry, as stored in the enrichment map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphaDisease {
    pub preferred_term: String,
    pub orphacode: i64,
    pub definition: Option<String>,
    pub orphanet_url: Option<String>,
    pub synonyms: Vec<String>,
}
