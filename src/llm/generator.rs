//! Async seam over the hosted text-generation endpoint

use crate::errors::Result;
use crate::llm::types::ChatMessage;
use async_trait::async_trait;

/// Text generation as both stages consume it: a list of chat messages in,
/// one completed text out. Implemented by [`super::AzureOpenAiClient`] in
/// production and by scripted stand-ins in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: Vec<ChatMessage>) -> Result<String>;
}
