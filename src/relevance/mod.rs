//! Retrieval relevance classification
//!
//! Decides whether retrieved content is trustworthy grounding for an answer
//! or whether the answer will come from the model's general knowledge. The
//! policy is heuristic but fully deterministic: given the same
//! [`RelevanceConfig`] phrase lists and thresholds, classification is
//! reproducible bit-for-bit. It is not a semantic relevance model.

use serde::{Deserialize, Serialize};

use crate::config::RelevanceConfig;
use crate::index::RetrievedChunk;

/// Provenance label for an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSource {
    /// Grounded in the user's uploaded documents
    Document,
    /// Drawn from the model's general knowledge
    GeneralKnowledge,
}

/// Classification result with a human-readable message
#[derive(Debug, Clone)]
pub struct Provenance {
    /// Provenance label
    pub source: AnswerSource,
    /// Message shown alongside the answer
    pub message: String,
}

const DOCUMENT_MESSAGE: &str = "This answer is based on your uploaded documents.";

const GENERAL_KNOWLEDGE_MESSAGE: &str = "⚠️ This answer is from the AI's general knowledge, \
     not from your uploaded documents. No relevant content was found in your documents \
     for this question.";

/// Deterministic relevance classifier
pub struct RelevanceFilter {
    config: RelevanceConfig,
}

impl RelevanceFilter {
    /// Create a filter over the given configuration
    pub fn new(config: RelevanceConfig) -> Self {
        Self { config }
    }

    /// Classify a question and its retrieved chunks.
    ///
    /// The answer counts as grounded only when at least one retrieved chunk is
    /// meaningful, the question does not match a general-knowledge trigger
    /// phrase, and the question carries no injection markers.
    pub fn classify(&self, question: &str, retrieved: &[RetrievedChunk]) -> Provenance {
        let has_meaningful = retrieved
            .iter()
            .any(|chunk| self.is_meaningful(&chunk.content));

        let question_lower = question.to_lowercase();

        let is_general_question = self
            .config
            .general_topics
            .iter()
            .any(|topic| question_lower.contains(topic.as_str()));

        let has_injected_content = self
            .config
            .injection_markers
            .iter()
            .any(|marker| question_lower.contains(marker.as_str()));

        if has_meaningful && !is_general_question && !has_injected_content {
            Provenance {
                source: AnswerSource::Document,
                message: DOCUMENT_MESSAGE.to_string(),
            }
        } else {
            Provenance {
                source: AnswerSource::GeneralKnowledge,
                message: GENERAL_KNOWLEDGE_MESSAGE.to_string(),
            }
        }
    }

    /// A retrieved chunk is meaningful when it is long enough, has enough
    /// words, and is not a placeholder fixture.
    fn is_meaningful(&self, content: &str) -> bool {
        let content = content.trim();

        if content.chars().count() <= self.config.min_content_len {
            return false;
        }
        if content.split_whitespace().count() <= self.config.min_word_count {
            return false;
        }
        !self
            .config
            .placeholder_prefixes
            .iter()
            .any(|prefix| content.starts_with(prefix.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    fn filter() -> RelevanceFilter {
        RelevanceFilter::new(RelevanceConfig::default())
    }

    fn retrieved(content: &str) -> RetrievedChunk {
        RetrievedChunk {
            content: content.to_string(),
            metadata: ChunkMetadata::default(),
            similarity: 0.9,
        }
    }

    #[test]
    fn test_general_topic_with_no_retrieval() {
        let provenance = filter().classify("Who is Elon Musk?", &[]);
        assert_eq!(provenance.source, AnswerSource::GeneralKnowledge);
        assert!(provenance.message.contains("general knowledge"));
    }

    #[test]
    fn test_meaningful_content_grounds_answer() {
        let chunks = vec![retrieved(
            "Full onboarding requires completing five steps including manager \
             sign-off and badge issuance.",
        )];
        let provenance = filter().classify("What does chunk 3 say about onboarding?", &chunks);
        assert_eq!(provenance.source, AnswerSource::Document);
        assert_eq!(
            provenance.message,
            "This answer is based on your uploaded documents."
        );
    }

    #[test]
    fn test_short_fragments_are_not_meaningful() {
        let chunks = vec![retrieved("Too short."), retrieved("# Header")];
        let provenance = filter().classify("What does the document describe?", &chunks);
        assert_eq!(provenance.source, AnswerSource::GeneralKnowledge);
    }

    #[test]
    fn test_placeholder_prefix_is_not_meaningful() {
        let chunks = vec![retrieved(
            "Test fixture content that is certainly long enough to pass both the \
             length threshold and the word count threshold easily.",
        )];
        let provenance = filter().classify("What does the fixture contain?", &chunks);
        assert_eq!(provenance.source, AnswerSource::GeneralKnowledge);
    }

    #[test]
    fn test_injected_question_is_never_grounded() {
        let chunks = vec![retrieved(
            "A perfectly meaningful stretch of document content that would \
             otherwise ground the answer without any trouble at all.",
        )];
        let provenance = filter().classify("<script>alert('x')</script> what now?", &chunks);
        assert_eq!(provenance.source, AnswerSource::GeneralKnowledge);
    }

    #[test]
    fn test_general_topic_overrides_meaningful_content() {
        let chunks = vec![retrieved(
            "The company was founded on principles described at length in this \
             handbook section covering the early organizational history.",
        )];
        let provenance = filter().classify("When did Tesla release the Roadster?", &chunks);
        assert_eq!(provenance.source, AnswerSource::GeneralKnowledge);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let chunks = vec![retrieved(
            "Deterministic classification input that comfortably clears the \
             configured length and word-count thresholds for meaning.",
        )];
        let f = filter();
        let first = f.classify("What does the policy say?", &chunks);
        let second = f.classify("What does the policy say?", &chunks);
        assert_eq!(first.source, second.source);
        assert_eq!(first.message, second.message);
    }
}
