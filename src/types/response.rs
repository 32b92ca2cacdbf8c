//! Request and response wire types

use serde::{Deserialize, Serialize};

use crate::relevance::AnswerSource;

/// Request body for the question endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    /// Natural-language question
    pub question: String,
}

/// Response from the question endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    /// Generated answer text
    pub answer: String,
    /// First token of each retrieved chunk, nearest-first
    pub relevant_concepts: Vec<String>,
    /// Provenance label for the answer
    pub answer_source: AnswerSource,
    /// Human-readable provenance message
    pub source_message: String,
    /// Number of chunks retrieved for the question
    pub retrieved_docs_count: usize,
}

/// Response from the ingestion endpoint
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Summary of the ingestion
    pub message: String,
    /// Number of chunks stored
    pub chunk_count: usize,
}

/// Response from the status endpoint
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    /// Whether the system can answer questions
    pub system_ready: bool,
    /// Size of the current chunk list
    pub chunks_count: usize,
    /// Whether a vector index is open
    pub has_index: bool,
    /// Whether a retriever handle is bound
    pub has_retriever: bool,
    /// Whether an answer chain is bound
    pub has_chain: bool,
}

/// Response from the chunk listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChunksResponse {
    /// Content of every chunk from the last ingestion, in order
    pub chunks: Vec<String>,
}

/// A directed edge in the concept graph snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Source concept name
    pub from: String,
    /// Target concept name
    pub to: String,
    /// Relation type
    pub rel: String,
}

/// Snapshot of the concept graph
#[derive(Debug, Clone, Serialize)]
pub struct GraphSnapshot {
    /// All node names
    pub nodes: Vec<String>,
    /// All edges with endpoints and type
    pub edges: Vec<GraphEdge>,
}
