use super::chat::ChatEndpoint;
use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Hosted chat-completions API. The key is handed in by the caller; nothing
/// here reads the environment.
pub struct OpenAIClient {
    model: String,
    endpoint: ChatEndpoint,
    concurrency: usize,
}

impl OpenAIClient {
    pub fn new(
        model: String,
        api_key: String,
        base_url: &str,
        timeout: Duration,
        concurrency: usize,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            model,
            endpoint: ChatEndpoint::new("openai", base_url, api_key, timeout)?,
            concurrency,
        })
    }
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
        });
        let message = self.endpoint.send(&body).await?;

        Ok(LlmResponse {
            text: message.content,
            reasoning: None,
            provider: "openai".to_string(),
            model: self.model.clone(),
        })
    }

    fn batch_concurrency(&self) -> usize {
        self.concurrency
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
