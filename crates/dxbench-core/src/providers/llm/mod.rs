pub mod chat;
pub mod fake;
pub mod local;
pub mod openai;
pub mod tracing;

use crate::model::LlmResponse;
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> anyhow::Result<LlmResponse>;

    /// One independent request per prompt. Output order and length match
    /// `prompts`; the first failure aborts the batch.
    async fn complete_batch(&self, prompts: &[String]) -> anyhow::Result<Vec<LlmResponse>> {
        let requests: Vec<_> = prompts.iter().map(|p| self.complete(p)).collect();
        stream::iter(requests)
            .buffered(self.batch_concurrency().max(1))
            .try_collect()
            .await
    }

    fn batch_concurrency(&self) -> usize {
        1
    }

    fn provider_name(&self) -> &'static str;

    fn model(&self) -> &str;
}
