//! LLM provider trait for text generation

use async_trait::async_trait;

use crate::error::Result;

/// Trait for LLM text generation
///
/// Implementations:
/// - `OllamaClient`: local Ollama server
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Generate a completion for the prompt
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Check if the provider is reachable
    async fn health_check(&self) -> Result<bool>;

    /// Provider name for logging
    fn name(&self) -> &str;

    /// Model being used
    fn model(&self) -> &str;
}
