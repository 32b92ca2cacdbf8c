//! Answer orchestration with provenance labeling

use std::sync::Arc;

use crate::error::Result;
use crate::generation::RetrievalChain;
use crate::index::Retriever;
use crate::relevance::{Provenance, RelevanceFilter};

/// A fully assembled answer
#[derive(Debug, Clone)]
pub struct Answer {
    /// Generated answer text
    pub answer: String,
    /// First token of each retrieved chunk, nearest-first
    pub relevant_concepts: Vec<String>,
    /// Provenance classification
    pub provenance: Provenance,
    /// Number of chunks retrieved
    pub retrieved_count: usize,
}

/// Combines retrieval, relevance classification, and completion into a final
/// answer.
///
/// Read-only: answering mutates nothing. The engine and the chain share one
/// retriever handle; the chain re-retrieves internally rather than receiving
/// pre-fetched context.
pub struct AnswerEngine {
    retriever: Arc<Retriever>,
    chain: Arc<RetrievalChain>,
    filter: RelevanceFilter,
}

impl AnswerEngine {
    /// Assemble an engine from its parts
    pub fn new(retriever: Arc<Retriever>, chain: Arc<RetrievalChain>, filter: RelevanceFilter) -> Self {
        Self {
            retriever,
            chain,
            filter,
        }
    }

    /// Answer a question with provenance labeling
    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let retrieved = self.retriever.retrieve(question).await?;

        let relevant_concepts: Vec<String> = retrieved
            .iter()
            .filter_map(|chunk| {
                chunk
                    .content
                    .split_whitespace()
                    .next()
                    .map(|token| token.to_string())
            })
            .collect();

        let provenance = self.filter.classify(question, &retrieved);

        let answer = self.chain.run(question).await?;

        Ok(Answer {
            answer,
            relevant_concepts,
            provenance,
            retrieved_count: retrieved.len(),
        })
    }
}
