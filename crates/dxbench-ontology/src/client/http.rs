//! HTTP layer: the only place that interprets Orphadata status codes.

use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::{OntologyError, OntologyResult};

/// Outcome of a name lookup request.
#[derive(Debug)]
pub(crate) enum LookupOutcome {
    NotFound,
    Found(Value),
}

#[derive(Debug, Clone)]
pub(crate) struct HttpBackend {
    pub(crate) client: reqwest::Client,
}

impl HttpBackend {
    /// GET the lookup URL. 404 => NotFound, 403 => PermissionDenied, other
    /// non-2xx => Status.
    pub(crate) async fn fetch(&self, name: &str, url: Url) -> OntologyResult<LookupOutcome> {
        debug!(url = %url, "orphadata lookup");
        let response = self.client.get(url).send().await?;
        let status = response.status();

        match status {
            s if s.is_success() => {
                let body: Value = response.json().await.map_err(|e| {
                    OntologyError::InvalidResponse {
                        message: format!("response for {:?} is not JSON: {}", name, e),
                    }
                })?;
                Ok(LookupOutcome::Found(body))
            }
            StatusCode::NOT_FOUND => Ok(LookupOutcome::NotFound),
            StatusCode::FORBIDDEN => Err(OntologyError::PermissionDenied {
                name: name.to_string(),
            }),
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| status.to_string());
                Err(OntologyError::Status {
                    name: name.to_string(),
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
