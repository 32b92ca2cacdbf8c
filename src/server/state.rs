//! Application state for the Q&A server

use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::answer::AnswerEngine;
use crate::concepts::{GraphStore, MemoryGraph, Neo4jGraph};
use crate::config::RagConfig;
use crate::error::Result;
use crate::generation::RetrievalChain;
use crate::index::{bind_retriever, ChunkStore, Retriever};
use crate::providers::{CompletionProvider, EmbeddingProvider, OllamaClient};
use crate::relevance::RelevanceFilter;

/// One generation of derived artifacts, replaced as a unit on ingestion.
///
/// A request that captured a generation keeps using it even if a newer one is
/// swapped in mid-flight; there is no tearing within a single request.
pub struct Generation {
    /// Content of the last-ingested chunk list, in order
    pub chunks: Vec<String>,
    /// Retriever handle bound to the current store
    pub retriever: Arc<Retriever>,
    /// Answer chain bound to the same retriever
    pub chain: Arc<RetrievalChain>,
    /// Orchestrator over retriever, chain, and relevance filter
    pub engine: Arc<AnswerEngine>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Concept graph store
    graph: Arc<dyn GraphStore>,
    /// Embedding backend
    embedder: Arc<dyn EmbeddingProvider>,
    /// Completion backend
    llm: Arc<dyn CompletionProvider>,
    /// Current generation; None until the first successful ingestion or a
    /// successful startup load
    current: RwLock<Option<Arc<Generation>>>,
}

impl AppState {
    /// Create application state with production providers and attempt to
    /// reopen persisted storage.
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!("Initializing application state...");

        let ollama = Arc::new(OllamaClient::new(&config.llm)?);

        // The graph is best-effort; fall back to the in-process store rather
        // than refusing to start.
        let graph: Arc<dyn GraphStore> = match Neo4jGraph::connect(&config.graph_db).await {
            Ok(graph) => {
                tracing::info!("Connected to graph store at {}", config.graph_db.uri);
                Arc::new(graph)
            }
            Err(e) => {
                tracing::warn!("Graph store unavailable ({}), using in-process graph", e);
                Arc::new(MemoryGraph::new())
            }
        };

        let state = Self::with_providers(config, graph, ollama.clone(), ollama);
        state.initialize_from_disk()?;
        Ok(state)
    }

    /// Create application state over explicit providers
    pub fn with_providers(
        config: RagConfig,
        graph: Arc<dyn GraphStore>,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn CompletionProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                graph,
                embedder,
                llm,
                current: RwLock::new(None),
            }),
        }
    }

    /// Rebuild the current generation from persisted storage, if any.
    ///
    /// The fixed storage path's presence and non-emptiness is the sole signal;
    /// a missing or unreadable store means starting fresh, not an error.
    pub fn initialize_from_disk(&self) -> Result<()> {
        let vector_db = &self.inner.config.vector_db;

        let Some(store) = ChunkStore::open_existing(&vector_db.storage_path)? else {
            return Ok(());
        };

        let chunks = load_chunk_list(&vector_db.chunks_data_path)?;
        let generation = self.build_generation(Arc::new(store), chunks);
        self.swap(generation);

        tracing::info!("Restored previous session state");
        Ok(())
    }

    /// Assemble a generation over an open store
    pub fn build_generation(&self, store: Arc<ChunkStore>, chunks: Vec<String>) -> Generation {
        let config = &self.inner.config;

        let retriever = bind_retriever(store, self.inner.embedder.clone(), config.vector_db.top_k);
        let chain = Arc::new(RetrievalChain::new(retriever.clone(), self.inner.llm.clone()));
        let engine = Arc::new(AnswerEngine::new(
            retriever.clone(),
            chain.clone(),
            RelevanceFilter::new(config.relevance.clone()),
        ));

        Generation {
            chunks,
            retriever,
            chain,
            engine,
        }
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get the graph store
    pub fn graph(&self) -> &Arc<dyn GraphStore> {
        &self.inner.graph
    }

    /// Get the embedding backend
    pub fn embedder(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedder
    }

    /// Capture the current generation
    pub fn current(&self) -> Option<Arc<Generation>> {
        self.inner.current.read().clone()
    }

    /// Replace the current generation in one write (last-writer-wins)
    pub fn swap(&self, generation: Generation) {
        *self.inner.current.write() = Some(Arc::new(generation));
    }

    /// Whether the system can answer questions
    pub fn is_ready(&self) -> bool {
        self.inner.current.read().is_some()
    }
}

/// Persist the last-ingested chunk list beside the vector store
pub(crate) fn save_chunk_list(path: &Path, chunks: &[String]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string(chunks)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load the persisted chunk list; a missing sidecar is an empty list
pub(crate) fn load_chunk_list(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = std::fs::read_to_string(path)?;
    let chunks = serde_json::from_str(&json)?;
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chunks_data.json");

        let chunks = vec!["first chunk".to_string(), "second chunk".to_string()];
        save_chunk_list(&path, &chunks).unwrap();
        assert_eq!(load_chunk_list(&path).unwrap(), chunks);
    }

    #[test]
    fn test_missing_chunk_list_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        assert!(load_chunk_list(&path).unwrap().is_empty());
    }
}
