use std::fmt::{Display, Formatter};
use std::path::PathBuf;

#[derive(Debug)]
pub struct ConfigError(pub String);

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ConfigError: {}", self.0)
    }
}
impl std::error::Error for ConfigError {}

/// Problems with the evaluation dataset itself.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset {path}: {detail}")]
    Parse { path: PathBuf, detail: String },

    #[error("case {index}: candidate pool is empty but k = {k}")]
    EmptyCandidatePool { index: usize, k: usize },

    #[error("case {index}: {needed} candidate descriptions needed, {available} available")]
    DescriptionMismatch {
        index: usize,
        needed: usize,
        available: usize,
    },

    #[error("case {index}: ground-truth description is missing")]
    MissingGtDescription { index: usize },
}

/// Generation backend failures. All of them halt the run.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} rate limited (status {status}): {body}")]
    RateLimited {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} returned status {status}: {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} network error: {detail}")]
    Network { provider: String, detail: String },

    #[error("{provider} response missing completion content")]
    MissingContent { provider: String },

    #[error("{provider} returned an undecodable response body: {detail}")]
    InvalidResponse { provider: String, detail: String },

    #[error("{provider} returned {got} completions for {expected} prompts")]
    BatchLength {
        provider: String,
        expected: usize,
        got: usize,
    },
}

impl ProviderError {
    pub fn from_status(provider: &str, status: u16, body: String) -> Self {
        if status == 429 {
            Self::RateLimited {
                provider: provider.to_string(),
                status,
                body,
            }
        } else {
            Self::Status {
                provider: provider.to_string(),
                status,
                body,
            }
        }
    }

    pub fn network(provider: &str, err: &reqwest::Error) -> Self {
        Self::Network {
            provider: provider.to_string(),
            detail: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorKind {
    MissingConfig,
    ConfigParse,
    Dataset,
    ProviderRateLimit,
    ProviderServer,
    Network,
    Other,
}

impl RunErrorKind {
    /// Configuration and input problems, as opposed to failures during the run.
    pub fn is_input_error(self) -> bool {
        matches!(self, Self::MissingConfig | Self::ConfigParse | Self::Dataset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: RunErrorKind,
    pub message: String,
}

impl RunError {
    pub fn new(kind: RunErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Classify an error chain, preferring typed errors over message matching.
    pub fn from_anyhow(err: &anyhow::Error) -> Self {
        let message = format!("{:#}", err);
        for cause in err.chain() {
            if let Some(p) = cause.downcast_ref::<ProviderError>() {
                let kind = match p {
                    ProviderError::RateLimited { .. } => RunErrorKind::ProviderRateLimit,
                    ProviderError::Network { .. } => RunErrorKind::Network,
                    _ => RunErrorKind::ProviderServer,
                };
                return Self::new(kind, message);
            }
            if cause.downcast_ref::<DatasetError>().is_some() {
                return Self::new(RunErrorKind::Dataset, message);
            }
            if let Some(c) = cause.downcast_ref::<ConfigError>() {
                return Self::new(Self::classify_config(&c.0), message);
            }
        }
        Self::new(RunErrorKind::Other, message)
    }

    fn classify_config(msg: &str) -> RunErrorKind {
        let msg = msg.to_lowercase();
        if msg.contains("failed to read config")
            && (msg.contains("no such file") || msg.contains("os error 2"))
        {
            RunErrorKind::MissingConfig
        } else {
            RunErrorKind::ConfigParse
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn provider_errors_map_to_kinds() {
        let err: anyhow::Error =
            ProviderError::from_status("openai", 429, "slow down".into()).into();
        assert_eq!(
            RunError::from_anyhow(&err).kind,
            RunErrorKind::ProviderRateLimit
        );

        let err: anyhow::Error = ProviderError::from_status("local", 503, String::new()).into();
        assert_eq!(
            RunError::from_anyhow(&err).kind,
            RunErrorKind::ProviderServer
        );

        let err: anyhow::Error = ProviderError::InvalidResponse {
            provider: "local".into(),
            detail: "expected value at line 1 column 1".into(),
        }
        .into();
        assert_eq!(
            RunError::from_anyhow(&err).kind,
            RunErrorKind::ProviderServer
        );
    }

    #[test]
    fn classification_sees_through_context() {
        let err = Err::<(), _>(DatasetError::EmptyCandidatePool { index: 3, k: 9 })
            .context("building prompts for k=9")
            .unwrap_err();
        let run_err = RunError::from_anyhow(&err);
        assert_eq!(run_err.kind, RunErrorKind::Dataset);
        assert!(run_err.message.contains("case 3"));
        assert!(run_err.kind.is_input_error());
    }

    #[test]
    fn missing_config_is_distinguished_from_parse_errors() {
        let missing: anyhow::Error = ConfigError(
            "failed to read config eval.yaml: No such file or directory (os error 2)".into(),
        )
        .into();
        assert_eq!(
            RunError::from_anyhow(&missing).kind,
            RunErrorKind::MissingConfig
        );

        let bad: anyhow::Error = ConfigError("failed to parse YAML: unknown field `kk`".into()).into();
        assert_eq!(RunError::from_anyhow(&bad).kind, RunErrorKind::ConfigParse);
    }

    #[test]
    fn untyped_errors_are_other() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(RunError::from_anyhow(&err).kind, RunErrorKind::Other);
    }
}
