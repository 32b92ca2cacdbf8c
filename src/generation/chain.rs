//! Retrieval-backed completion chain

use std::sync::Arc;

use crate::error::Result;
use crate::index::Retriever;
use crate::providers::CompletionProvider;

use super::prompt::PromptBuilder;

/// A question-answering chain bound to a retriever and a completion model.
///
/// The chain retrieves through its own bound retriever on every run; callers
/// never hand it pre-fetched context.
pub struct RetrievalChain {
    retriever: Arc<Retriever>,
    llm: Arc<dyn CompletionProvider>,
}

impl RetrievalChain {
    /// Bind a chain to a retriever and completion model
    pub fn new(retriever: Arc<Retriever>, llm: Arc<dyn CompletionProvider>) -> Self {
        Self { retriever, llm }
    }

    /// Answer a question: retrieve context, build the prompt, complete.
    ///
    /// Completion output is model-sampled and therefore non-deterministic.
    pub async fn run(&self, question: &str) -> Result<String> {
        let retrieved = self.retriever.retrieve(question).await?;
        let context = PromptBuilder::build_context(&retrieved);
        let prompt = PromptBuilder::build_qa_prompt(question, &context);

        self.llm.complete(&prompt).await
    }
}
