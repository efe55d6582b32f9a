use crate::model::LlmResponse;
use crate::providers::llm::LlmClient;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info_span, Instrument};

/// Wraps a client with one `llm.request` span per completion.
pub struct TracingLlmClient {
    inner: Arc<dyn LlmClient>,
}

impl TracingLlmClient {
    pub fn new(inner: Arc<dyn LlmClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl LlmClient for TracingLlmClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let span = info_span!(
            "llm.request",
            "llm.provider" = self.inner.provider_name(),
            "llm.model" = self.inner.model(),
            "llm.prompt_chars" = prompt.len(),
            "llm.completion_chars" = tracing::field::Empty,
            "llm.has_reasoning" = tracing::field::Empty,
            "llm.latency_ms" = tracing::field::Empty,
            "error" = tracing::field::Empty,
            "error.message" = tracing::field::Empty
        );

        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete(prompt).await;
            let span = tracing::Span::current();
            span.record("llm.latency_ms", start.elapsed().as_millis() as u64);

            match &result {
                Ok(resp) => {
                    span.record("llm.completion_chars", resp.text.len());
                    span.record("llm.has_reasoning", resp.reasoning.is_some());
                    tracing::debug!("completion received");
                }
                Err(e) => {
                    span.record("error", true);
                    span.record("error.message", e.to_string().as_str());
                    tracing::warn!(error = %e, "completion failed");
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn complete_batch(&self, prompts: &[String]) -> anyhow::Result<Vec<LlmResponse>> {
        let span = info_span!(
            "llm.batch",
            "llm.provider" = self.inner.provider_name(),
            "llm.batch_size" = prompts.len()
        );
        async move {
            let start = std::time::Instant::now();
            let result = self.inner.complete_batch(prompts).await;
            match &result {
                Ok(out) => tracing::debug!(
                    completions = out.len(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "batch finished"
                ),
                Err(e) => tracing::warn!(error = %e, "batch failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn batch_concurrency(&self) -> usize {
        self.inner.batch_concurrency()
    }

    fn provider_name(&self) -> &'static str {
        self.inner.provider_name()
    }

    fn model(&self) -> &str {
        self.inner.model()
    }
}
