use super::chat::ChatEndpoint;
use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

/// Locally served model behind an OpenAI-compatible server (e.g. vLLM).
/// The server applies the model's chat template; sampling is greedy unless
/// a temperature is configured.
pub struct LocalServerClient {
    model: String,
    endpoint: ChatEndpoint,
    temperature: f32,
    max_tokens: Option<u32>,
    concurrency: usize,
}

/// Key sent when the server was started without `--api-key`.
pub const DEFAULT_LOCAL_API_KEY: &str = "EMPTY";

impl LocalServerClient {
    pub fn new(
        model: String,
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let key = api_key.unwrap_or_else(|| DEFAULT_LOCAL_API_KEY.to_string());
        Ok(Self {
            model,
            endpoint: ChatEndpoint::new("local", base_url, key, timeout)?,
            temperature: 0.0,
            max_tokens: None,
            concurrency: 1,
        })
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }
}

#[async_trait]
impl LlmClient for LocalServerClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": self.temperature,
        });
        if let Some(max) = self.max_tokens {
            body["max_tokens"] = json!(max);
        }
        let message = self.endpoint.send(&body).await?;

        Ok(LlmResponse {
            text: message.content,
            reasoning: message.reasoning_content,
            provider: "local".to_string(),
            model: self.model.clone(),
        })
    }

    fn batch_concurrency(&self) -> usize {
        self.concurrency
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
