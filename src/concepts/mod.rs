//! Concept extraction and graph maintenance

mod extractor;
mod graph;
mod neo4j;

pub use extractor::{extract_concepts, CONCEPT_CHUNK_LIMIT};
pub use graph::{ConceptGraphBuilder, GraphLabel, GraphStore, MemoryGraph, Relation};
pub use neo4j::Neo4jGraph;
