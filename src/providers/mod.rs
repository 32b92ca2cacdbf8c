//! Provider abstractions for embeddings and text completion
//!
//! Trait seams around the external model services. The production backend for
//! both is an Ollama-compatible HTTP server; tests substitute deterministic
//! fakes.

mod ollama;

pub use ollama::OllamaClient;

use async_trait::async_trait;

use crate::error::Result;

/// Trait for generating text embeddings
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generate embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts.
    ///
    /// Default implementation calls `embed` sequentially.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}

/// Trait for LLM text completion
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Complete a prompt into answer text.
    ///
    /// Model sampling makes the output non-deterministic; callers must not
    /// rely on stable completions.
    async fn complete(&self, prompt: &str) -> Result<String>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
