//! Error types for the Orphadata client and enrichment.

/// Ontology lookup errors.
#[derive(Debug, thiserror::Error)]
pub enum OntologyError {
    /// Orphadata refused access (403). Not retried; aborts enrichment.
    #[error("access denied (403) from Orphadata API for {name:?}; check Orphadata access conditions")]
    PermissionDenied { name: String },

    /// Any other non-success status.
    #[error("HTTP {status} for {name:?}: {body}")]
    Status {
        name: String,
        status: u16,
        body: String,
    },

    /// Network error.
    #[error("network error: {message}")]
    Network { message: String },

    /// Payload that could not be turned into a disease record.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    /// Configuration error (bad base URL, bad worker count).
    #[error("configuration error: {message}")]
    Config { message: String },

    /// A lookup task panicked or was cancelled.
    #[error("lookup worker failed: {message}")]
    Worker { message: String },

    /// Writing or reading enrichment files.
    #[error("io error on {path}: {message}")]
    Io { path: String, message: String },
}

impl From<reqwest::Error> for OntologyError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for ontology operations.
pub type OntologyResult<T> = Result<T, OntologyError>;
