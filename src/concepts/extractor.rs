//! Concept token extraction from chunk sequences

use crate::types::Chunk;

/// Number of leading chunks considered for concept extraction
pub const CONCEPT_CHUNK_LIMIT: usize = 5;

/// Derive an ordered list of concept tokens from the first chunks of an
/// ingestion.
///
/// Each concept is the first whitespace-delimited token of a chunk's trimmed
/// content; blank chunks are skipped. The output order follows the input
/// chunk order, which downstream edge creation depends on.
pub fn extract_concepts(chunks: &[Chunk]) -> Vec<String> {
    chunks
        .iter()
        .take(CONCEPT_CHUNK_LIMIT)
        .filter_map(|chunk| {
            chunk
                .content
                .split_whitespace()
                .next()
                .map(|token| token.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChunkMetadata;

    fn chunk(content: &str) -> Chunk {
        Chunk::new(content.to_string(), ChunkMetadata::default())
    }

    #[test]
    fn test_extracts_first_token_skipping_blanks() {
        let chunks = vec![
            chunk("Apple pie"),
            chunk(""),
            chunk("Banana split"),
            chunk("   "),
            chunk("Cherry cake"),
        ];

        assert_eq!(extract_concepts(&chunks), vec!["Apple", "Banana", "Cherry"]);
    }

    #[test]
    fn test_limited_to_first_five_chunks() {
        let chunks: Vec<Chunk> = (0..8).map(|i| chunk(&format!("c{} rest", i))).collect();
        let concepts = extract_concepts(&chunks);
        assert_eq!(concepts, vec!["c0", "c1", "c2", "c3", "c4"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(extract_concepts(&[]).is_empty());
    }

    #[test]
    fn test_deterministic_and_order_preserving() {
        let chunks = vec![chunk("zeta first"), chunk("alpha second")];
        assert_eq!(extract_concepts(&chunks), vec!["zeta", "alpha"]);
        assert_eq!(extract_concepts(&chunks), extract_concepts(&chunks));
    }
}
