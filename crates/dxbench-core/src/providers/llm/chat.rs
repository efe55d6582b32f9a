//! Shared HTTP plumbing for OpenAI-compatible `/chat/completions` endpoints.

use crate::errors::ProviderError;
use serde_json::Value;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ChatEndpoint {
    provider: &'static str,
    url: String,
    api_key: String,
    client: reqwest::Client,
}

/// Text pulled out of `choices[0].message`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub content: String,
    pub reasoning_content: Option<String>,
}

impl ChatEndpoint {
    pub fn new(
        provider: &'static str,
        base_url: &str,
        api_key: String,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::network(provider, &e))?;
        Ok(Self {
            provider,
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn send(&self, body: &Value) -> Result<ChatMessage, ProviderError> {
        let resp = self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::network(self.provider, &e))?;

        let status = resp.status();
        if !status.is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(ProviderError::from_status(
                self.provider,
                status.as_u16(),
                error_text,
            ));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| ProviderError::network(self.provider, &e))?;
        let json: Value =
            serde_json::from_slice(&bytes).map_err(|e| ProviderError::InvalidResponse {
                provider: self.provider.to_string(),
                detail: e.to_string(),
            })?;
        extract_message(self.provider, &json)
    }
}

fn extract_message(provider: &str, json: &Value) -> Result<ChatMessage, ProviderError> {
    let content = json
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .ok_or_else(|| ProviderError::MissingContent {
            provider: provider.to_string(),
        })?;
    let reasoning_content = json
        .pointer("/choices/0/message/reasoning_content")
        .and_then(Value::as_str)
        .map(|r| r.trim().to_string());

    Ok(ChatMessage {
        content: content.trim().to_string(),
        reasoning_content,
    })
}
