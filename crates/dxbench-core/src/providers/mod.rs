pub mod llm;

use crate::config::{EvalConfig, ProviderKind};
use crate::errors::ConfigError;
use llm::fake::FakeClient;
use llm::local::LocalServerClient;
use llm::openai::OpenAIClient;
use llm::tracing::TracingLlmClient;
use llm::LlmClient;
use std::sync::Arc;
use std::time::Duration;

/// Credentials resolved once at process start and handed to the client
/// constructors.
#[derive(Clone, Default)]
pub struct Credentials {
    pub openai_api_key: Option<String>,
    pub local_api_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<redacted>"))
            .field("local_api_key", &self.local_api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Build the generation backend for `cfg`, wrapped in request tracing.
pub fn build_client(
    cfg: &EvalConfig,
    credentials: &Credentials,
) -> anyhow::Result<Arc<dyn LlmClient>> {
    let timeout = Duration::from_secs(cfg.settings.timeout_secs);
    let kind = cfg.provider.resolve(&cfg.model);

    let client: Arc<dyn LlmClient> = match kind {
        ProviderKind::Openai => {
            let key = credentials.openai_api_key.clone().ok_or_else(|| {
                ConfigError(format!(
                    "model '{}' uses the hosted API but no OPENAI_API_KEY is set",
                    cfg.model
                ))
            })?;
            Arc::new(OpenAIClient::new(
                cfg.model.clone(),
                key,
                &cfg.openai.base_url,
                timeout,
                cfg.settings.concurrency,
            )?)
        }
        ProviderKind::Local | ProviderKind::Auto => {
            if let Some(tp) = cfg.local.tensor_parallel {
                tracing::info!(tensor_parallel = tp, "local server parallelism (informational)");
            }
            Arc::new(
                LocalServerClient::new(
                    cfg.model.clone(),
                    &cfg.local.base_url,
                    credentials.local_api_key.clone(),
                    timeout,
                )?
                .with_sampling(cfg.settings.temperature, cfg.settings.max_tokens)
                .with_concurrency(cfg.settings.concurrency),
            )
        }
        ProviderKind::Fake => Arc::new(
            FakeClient::new(cfg.model.clone())
                .with_response(cfg.fake_response.clone().unwrap_or_default()),
        ),
    };

    tracing::debug!(provider = client.provider_name(), model = %cfg.model, "backend ready");
    Ok(Arc::new(TracingLlmClient::new(client)))
}
