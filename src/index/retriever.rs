//! Top-k retriever handle

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;

use super::store::{ChunkStore, RetrievedChunk};

/// A retriever bound to a chunk store and embedder, configured for top-k
/// similarity queries.
///
/// Handles are cheap to clone via `Arc` and stay valid for in-flight requests
/// even after a newer generation replaces them.
pub struct Retriever {
    store: Arc<ChunkStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
}

impl Retriever {
    /// Bind a retriever to a store and embedder
    pub fn new(store: Arc<ChunkStore>, embedder: Arc<dyn EmbeddingProvider>, top_k: usize) -> Self {
        Self {
            store,
            embedder,
            top_k,
        }
    }

    /// Retrieve the `top_k` chunks nearest to the question, nearest-first
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedChunk>> {
        let embedding = self
            .embedder
            .embed(question)
            .await
            .map_err(|e| Error::retrieval(e.to_string()))?;

        self.store.search(&embedding, self.top_k)
    }

    /// The configured result count
    pub fn top_k(&self) -> usize {
        self.top_k
    }
}
