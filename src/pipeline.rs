//! Document ingestion coordinator
//!
//! Drives upload → chunk → concept-extract → graph-update → index-update and
//! swaps the process-wide generation only after every derived artifact has
//! been fully built. A failed ingestion therefore leaves the previous
//! generation (chunk list included) intact.

use std::sync::Arc;

use crate::concepts::{extract_concepts, ConceptGraphBuilder};
use crate::error::{Error, Result};
use crate::index::{build_index, ChunkStore};
use crate::ingestion;
use crate::server::state::{save_chunk_list, AppState};
use crate::types::FileType;

/// Result of a successful ingestion
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    /// Human-readable summary
    pub message: String,
    /// Number of chunks stored
    pub chunk_count: usize,
}

/// Ingest one uploaded document.
///
/// The file type is validated before any I/O; an unsupported extension fails
/// fast with zero side effects. The upload lives in transient scoped storage
/// that is removed on every exit path. A graph update failure is logged and
/// skipped; an index build failure aborts the ingestion.
pub async fn ingest_document(
    state: &AppState,
    filename: &str,
    data: &[u8],
) -> Result<IngestOutcome> {
    let file_type = FileType::from_filename(filename);
    if !file_type.is_supported() {
        let extension = filename.rsplit('.').next().unwrap_or("");
        return Err(Error::UnsupportedFileType(format!(".{}", extension)));
    }

    let extension = filename.rsplit('.').next().unwrap_or("bin");

    // Transient scoped storage; the temp file is deleted when this handle
    // drops, on success and on every error path alike.
    let temp = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&format!(".{}", extension))
        .tempfile()?;
    tokio::fs::write(temp.path(), data).await?;

    let chunks = ingestion::load_and_split(
        temp.path(),
        filename,
        &file_type,
        &state.config().chunking,
    )?;
    tracing::info!("Split '{}' into {} chunks", filename, chunks.len());

    // The concept graph is best-effort: a write failure must not abort the
    // ingestion.
    let concepts = extract_concepts(&chunks);
    let builder = ConceptGraphBuilder::new(state.graph().as_ref());
    if let Err(e) = builder.upsert_concepts(&concepts).await {
        tracing::warn!("Concept graph update failed, continuing ingestion: {}", e);
    }

    let store = Arc::new(ChunkStore::open_or_create(
        &state.config().vector_db.storage_path,
    )?);
    build_index(&store, state.embedder().as_ref(), &chunks).await?;

    let contents: Vec<String> = chunks.iter().map(|chunk| chunk.content.clone()).collect();
    save_chunk_list(&state.config().vector_db.chunks_data_path, &contents)?;

    let chunk_count = contents.len();
    let generation = state.build_generation(store, contents);
    state.swap(generation);

    tracing::info!("Ingested '{}': {} chunks", filename, chunk_count);

    Ok(IngestOutcome {
        message: format!(
            "Uploaded {} (.{}), stored {} chunks.",
            filename, extension, chunk_count
        ),
        chunk_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::concepts::{GraphStore, MemoryGraph};
    use crate::config::RagConfig;
    use crate::relevance::AnswerSource;
    use crate::test_util::{CannedLlm, FlakyEmbedder};

    const MARKDOWN: &str = "# Onboarding Guide\n\n\
        Full onboarding requires completing five steps including manager \
        sign-off and badge issuance before the first project assignment.\n\n\
        Equipment requests go through the facilities portal and are approved \
        within two business days of the manager confirming the request.\n\n\
        Security training must be completed in the first week, and the badge \
        remains provisional until the final module is passed.";

    fn test_state(dir: &std::path::Path) -> (AppState, Arc<MemoryGraph>, Arc<FlakyEmbedder>) {
        let mut config = RagConfig::default();
        config.vector_db.storage_path = dir.join("vectors.db");
        config.vector_db.chunks_data_path = dir.join("chunks_data.json");

        let graph = Arc::new(MemoryGraph::new());
        let embedder = Arc::new(FlakyEmbedder::new());
        let llm = Arc::new(CannedLlm::new("A canned answer."));

        let state = AppState::with_providers(config, graph.clone(), embedder.clone(), llm);
        (state, graph, embedder)
    }

    #[tokio::test]
    async fn test_unsupported_extension_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let (state, graph, _) = test_state(dir.path());

        let err = ingest_document(&state, "payload.exe", b"MZ binary")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));

        // Nothing was touched: no generation, no graph nodes, no store file.
        assert!(!state.is_ready());
        let (nodes, _) = graph.snapshot().await.unwrap();
        assert!(nodes.is_empty());
        assert!(!state.config().vector_db.storage_path.exists());
    }

    #[tokio::test]
    async fn test_markdown_ingest_builds_all_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let (state, graph, _) = test_state(dir.path());

        let outcome = ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();

        assert!(outcome.chunk_count > 0);
        assert!(outcome.message.contains("guide.md"));
        assert!(state.is_ready());

        let generation = state.current().unwrap();
        assert_eq!(generation.chunks.len(), outcome.chunk_count);

        let (nodes, _) = graph.snapshot().await.unwrap();
        assert!(!nodes.is_empty());

        assert!(state.config().vector_db.chunks_data_path.exists());
    }

    #[tokio::test]
    async fn test_general_question_after_ingest_is_general_knowledge() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _, _) = test_state(dir.path());

        ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();

        let generation = state.current().unwrap();
        let answer = generation.engine.answer("Who is Elon Musk?").await.unwrap();
        assert_eq!(answer.provenance.source, AnswerSource::GeneralKnowledge);
    }

    #[tokio::test]
    async fn test_document_question_is_grounded() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _, _) = test_state(dir.path());

        ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();

        let generation = state.current().unwrap();
        let answer = generation
            .engine
            .answer("What does the guide say about onboarding?")
            .await
            .unwrap();
        assert_eq!(answer.provenance.source, AnswerSource::Document);
        assert!(!answer.relevant_concepts.is_empty());
        assert_eq!(answer.answer, "A canned answer.");
        assert!(answer.retrieved_count > 0);
    }

    #[tokio::test]
    async fn test_failed_index_build_keeps_previous_generation() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _, embedder) = test_state(dir.path());

        ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();
        let before = state.current().unwrap();

        embedder.fail_next(true);
        let err = ingest_document(&state, "other.txt", b"Replacement content that will not index.")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::IndexBuild(_)));

        // The previous generation still serves, chunk list included.
        let after = state.current().unwrap();
        assert_eq!(after.chunks, before.chunks);
    }

    #[tokio::test]
    async fn test_graph_failure_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RagConfig::default();
        config.vector_db.storage_path = dir.path().join("vectors.db");
        config.vector_db.chunks_data_path = dir.path().join("chunks_data.json");

        let graph = Arc::new(crate::test_util::FailingGraph);
        let embedder = Arc::new(FlakyEmbedder::new());
        let llm = Arc::new(CannedLlm::new("ok"));
        let state = AppState::with_providers(config, graph, embedder, llm);

        let outcome = ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();
        assert!(outcome.chunk_count > 0);
        assert!(state.is_ready());
    }

    #[tokio::test]
    async fn test_restart_restores_generation_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _, _) = test_state(dir.path());

        let outcome = ingest_document(&state, "guide.md", MARKDOWN.as_bytes())
            .await
            .unwrap();

        // A fresh state over the same paths restores the persisted session.
        let (restarted, _, _) = test_state(dir.path());
        assert!(!restarted.is_ready());
        restarted.initialize_from_disk().unwrap();
        assert!(restarted.is_ready());
        assert_eq!(
            restarted.current().unwrap().chunks.len(),
            outcome.chunk_count
        );
    }
}
