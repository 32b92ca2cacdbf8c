//! kgraph-rag: Document Q&A with vector retrieval and concept graph extraction
//!
//! Ingests documents, splits them into overlapping chunks, embeds and indexes
//! them for similarity search, maintains a lightweight concept graph from
//! chunk sequences, and answers natural-language questions with provenance
//! labels distinguishing document-grounded answers from general-knowledge
//! fallbacks.

pub mod answer;
pub mod concepts;
pub mod config;
pub mod error;
pub mod generation;
pub mod index;
pub mod ingestion;
pub mod pipeline;
pub mod providers;
pub mod relevance;
pub mod server;
pub mod types;

#[cfg(test)]
pub(crate) mod test_util;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkMetadata, FileType},
    response::{AskRequest, AskResponse, GraphSnapshot, StatusResponse, UploadResponse},
};
