//! Prompt templates for retrieval-augmented answering

use crate::index::RetrievedChunk;

/// Prompt builder for question answering
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build context from retrieved chunks, nearest-first
    pub fn build_context(retrieved: &[RetrievedChunk]) -> String {
        let mut context = String::new();

        for (i, chunk) in retrieved.iter().enumerate() {
            context.push_str(&format!(
                "[{}] {} (chunk {})\n\n{}\n\n---\n\n",
                i + 1,
                chunk.metadata.document,
                chunk.metadata.chunk_index,
                chunk.content
            ));
        }

        context
    }

    /// Build the question-answering prompt
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            r#"Use the following pieces of context to answer the question at the end.
If you don't know the answer, just say that you don't know; don't try to make up an answer.

CONTEXT:
{context}

QUESTION: {question}

Answer:"#,
            context = context,
            question = question
        )
    }
}
