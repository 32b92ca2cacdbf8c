//! Vector index management
//!
//! Embeds chunks and maintains a durable similarity index at a fixed on-disk
//! path. The path's presence and non-emptiness is the sole signal for "load
//! existing index" vs "start fresh" at startup.

mod retriever;
mod store;

pub use retriever::Retriever;
pub use store::{ChunkStore, RetrievedChunk};

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::providers::EmbeddingProvider;
use crate::types::Chunk;

/// Embed every chunk and append it into the store.
///
/// Repeated uploads of the same content accumulate duplicate entries; the
/// store does not deduplicate. Any embedding or storage failure aborts the
/// build.
pub async fn build_index(
    store: &ChunkStore,
    embedder: &dyn EmbeddingProvider,
    chunks: &[Chunk],
) -> Result<()> {
    for chunk in chunks {
        let embedding = embedder
            .embed(&chunk.content)
            .await
            .map_err(|e| Error::index_build(e.to_string()))?;
        store.insert(chunk, &embedding)?;
    }

    tracing::info!("Indexed {} chunks", chunks.len());
    Ok(())
}

/// Bind a retriever handle to a store and embedder with the given `top_k`.
pub fn bind_retriever(
    store: Arc<ChunkStore>,
    embedder: Arc<dyn EmbeddingProvider>,
    top_k: usize,
) -> Arc<Retriever> {
    Arc::new(Retriever::new(store, embedder, top_k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::FlakyEmbedder;
    use crate::types::ChunkMetadata;

    fn chunk(content: &str, index: u32) -> Chunk {
        Chunk::new(
            content.to_string(),
            ChunkMetadata {
                document: "doc.txt".to_string(),
                chunk_index: index,
                total_pages: None,
            },
        )
    }

    #[tokio::test]
    async fn test_self_retrieval_round_trip() {
        let store = Arc::new(ChunkStore::in_memory().unwrap());
        let embedder = Arc::new(FlakyEmbedder::new());

        let chunks = vec![
            chunk("The onboarding process has five distinct steps.", 0),
            chunk("Security badges are issued by the facilities team.", 1),
            chunk("Quarterly reviews follow a written rubric.", 2),
        ];

        build_index(&store, embedder.as_ref(), &chunks).await.unwrap();

        let retriever = bind_retriever(store, embedder, 1);
        let results = retriever.retrieve(&chunks[0].content).await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].content, chunks[0].content);
    }

    #[tokio::test]
    async fn test_embedding_failure_surfaces_as_index_build_error() {
        let store = ChunkStore::in_memory().unwrap();
        let embedder = FlakyEmbedder::new();
        embedder.fail_next(true);

        let err = build_index(&store, &embedder, &[chunk("content", 0)])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IndexBuild(_)));
        assert!(store.is_empty().unwrap());
    }

    #[tokio::test]
    async fn test_retrieval_failure_surfaces_as_retrieval_error() {
        let store = Arc::new(ChunkStore::in_memory().unwrap());
        let embedder = Arc::new(FlakyEmbedder::new());
        let retriever = bind_retriever(store, embedder.clone(), 3);

        embedder.fail_next(true);
        let err = retriever.retrieve("anything").await.unwrap_err();
        assert!(matches!(err, Error::Retrieval(_)));
    }
}
