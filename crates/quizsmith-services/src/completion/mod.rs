mod openai;

pub use openai::OpenAiCompletionClient;

use async_trait::async_trait;

/// A text-completion backend that turns a prompt into a single reply.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Model identifier, for logging
    fn model_name(&self) -> &str;

    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> anyhow::Result<String>;
}
