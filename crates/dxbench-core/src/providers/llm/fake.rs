use super::LlmClient;
use crate::model::LlmResponse;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Deterministic client for tests and dry runs: a fixed response, or a
/// script of responses consumed in order (the fixed one once it runs out).
#[derive(Debug)]
pub struct FakeClient {
    model: String,
    fixed_response: String,
    script: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl FakeClient {
    pub fn new(model: String) -> Self {
        Self {
            model,
            fixed_response: String::new(),
            script: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_response(mut self, response: String) -> Self {
        self.fixed_response = response;
        self
    }

    pub fn with_script<I, S>(self, responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.script.lock().expect("fake script lock") =
            responses.into_iter().map(Into::into).collect();
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("fake prompts lock").clone()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse> {
        self.prompts
            .lock()
            .expect("fake prompts lock")
            .push(prompt.to_string());
        let text = self
            .script
            .lock()
            .expect("fake script lock")
            .pop_front()
            .unwrap_or_else(|| self.fixed_response.clone());

        Ok(LlmResponse {
            text,
            reasoning: None,
            provider: "fake".to_string(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
