//! Orphadata client.
//!
//! Public API: no status code knowledge. All HTTP/status mapping in http.rs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::debug;

use crate::error::{OntologyError, OntologyResult};
use crate::types::{OntologyConfig, OrphaDisease};

mod helpers;
mod http;

use helpers::{lookup_url, normalize_name, parse_disease};
use http::{HttpBackend, LookupOutcome};

const USER_AGENT_VALUE: &str = concat!("dxbench-ontology/", env!("CARGO_PKG_VERSION"));

/// Something that can resolve a disease label to an ontology record.
/// `Ok(None)` means "no match"; errors are fatal for enrichment.
#[async_trait]
pub trait DiseaseLookup: Send + Sync {
    async fn lookup(&self, name: &str) -> OntologyResult<Option<OrphaDisease>>;
}

#[derive(Debug, Clone)]
pub struct OrphadataClient {
    http: HttpBackend,
    config: OntologyConfig,
}

impl OrphadataClient {
    pub fn new(config: OntologyConfig) -> OntologyResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| OntologyError::Network {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        // Fail on a bad base URL at construction, not on the first lookup.
        lookup_url(&config.url, "probe", &config.lang)?;

        Ok(Self {
            http: HttpBackend { client },
            config,
        })
    }

    pub fn from_env() -> OntologyResult<Self> {
        Self::new(OntologyConfig::from_env())
    }

    pub fn config(&self) -> &OntologyConfig {
        &self.config
    }
}

#[async_trait]
impl DiseaseLookup for OrphadataClient {
    async fn lookup(&self, name: &str) -> OntologyResult<Option<OrphaDisease>> {
        let name = normalize_name(name);
        let url = lookup_url(&self.config.url, &name, &self.config.lang)?;

        match self.http.fetch(&name, url).await? {
            LookupOutcome::NotFound => {
                debug!(label = %name, "no Orphanet match");
                Ok(None)
            }
            LookupOutcome::Found(payload) => {
                let record = parse_disease(&name, &payload)?;
                if record.is_none() {
                    debug!(label = %name, "Orphanet payload had no results");
                }
                Ok(record)
            }
        }
    }
}
