//! Graph store abstraction and concept graph builder

use std::collections::BTreeSet;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::Result;
use crate::types::GraphEdge;

/// Node labels allowed in the graph.
///
/// The store's query language does not take labels as bind parameters, so
/// label text is spliced into query strings; restricting it to this enum keeps
/// untrusted input out of query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphLabel {
    /// A concept extracted from a chunk
    Concept,
}

impl GraphLabel {
    /// Label text as it appears in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Concept => "Concept",
        }
    }
}

/// Relation types allowed in the graph; same whitelist rationale as
/// [`GraphLabel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// Sequential adjacency between concepts of one ingestion
    RelatedTo,
}

impl Relation {
    /// Relation text as it appears in queries
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelatedTo => "RELATED_TO",
        }
    }
}

/// A labeled-graph store with MERGE-style idempotent upserts.
///
/// Every write is its own transaction; there is no batch transaction spanning
/// multiple calls. Repeating any call is a no-op.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Upsert a node identified by (label, name)
    async fn upsert_node(&self, label: GraphLabel, name: &str) -> Result<()>;

    /// Upsert a directed edge identified by (from, to, relation)
    async fn upsert_edge(&self, from: &str, to: &str, rel: Relation) -> Result<()>;

    /// All node names with the given label, sorted ascending
    async fn node_names(&self, label: GraphLabel) -> Result<Vec<String>>;

    /// All node names and edges, for external inspection
    async fn snapshot(&self) -> Result<(Vec<String>, Vec<GraphEdge>)>;
}

/// Builds the concept graph from ordered concept lists
pub struct ConceptGraphBuilder<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> ConceptGraphBuilder<'a> {
    /// Create a builder over a graph store
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Upsert one node per concept and one RELATED_TO edge per consecutive
    /// pair.
    ///
    /// Each upsert commits independently, so a failure partway leaves a
    /// partially-updated graph. The graph is best-effort; callers treat
    /// failures as non-fatal.
    pub async fn upsert_concepts(&self, concepts: &[String]) -> Result<()> {
        for concept in concepts {
            self.store.upsert_node(GraphLabel::Concept, concept).await?;
        }

        for pair in concepts.windows(2) {
            self.store
                .upsert_edge(&pair[0], &pair[1], Relation::RelatedTo)
                .await?;
        }

        Ok(())
    }
}

#[derive(Default)]
struct MemoryGraphInner {
    nodes: BTreeSet<String>,
    edges: BTreeSet<(String, String, String)>,
}

/// In-process graph store.
///
/// Used as the fallback when no graph server is reachable at startup, and by
/// tests. Upserts are idempotent through set semantics.
#[derive(Default)]
pub struct MemoryGraph {
    inner: Mutex<MemoryGraphInner>,
}

impl MemoryGraph {
    /// Create an empty in-memory graph
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn upsert_node(&self, _label: GraphLabel, name: &str) -> Result<()> {
        self.inner.lock().nodes.insert(name.to_string());
        Ok(())
    }

    async fn upsert_edge(&self, from: &str, to: &str, rel: Relation) -> Result<()> {
        self.inner.lock().edges.insert((
            from.to_string(),
            to.to_string(),
            rel.as_str().to_string(),
        ));
        Ok(())
    }

    async fn node_names(&self, _label: GraphLabel) -> Result<Vec<String>> {
        Ok(self.inner.lock().nodes.iter().cloned().collect())
    }

    async fn snapshot(&self) -> Result<(Vec<String>, Vec<GraphEdge>)> {
        let inner = self.inner.lock();
        let nodes = inner.nodes.iter().cloned().collect();
        let edges = inner
            .edges
            .iter()
            .map(|(from, to, rel)| GraphEdge {
                from: from.clone(),
                to: to.clone(),
                rel: rel.clone(),
            })
            .collect();
        Ok((nodes, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let graph = MemoryGraph::new();
        let builder = ConceptGraphBuilder::new(&graph);
        let concepts = vec!["A".to_string(), "B".to_string(), "C".to_string()];

        builder.upsert_concepts(&concepts).await.unwrap();
        builder.upsert_concepts(&concepts).await.unwrap();

        let (nodes, edges) = graph.snapshot().await.unwrap();
        assert_eq!(nodes, vec!["A", "B", "C"]);
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].from, "A");
        assert_eq!(edges[0].to, "B");
        assert_eq!(edges[1].from, "B");
        assert_eq!(edges[1].to, "C");
        assert!(edges.iter().all(|e| e.rel == "RELATED_TO"));
    }

    #[tokio::test]
    async fn test_single_concept_creates_no_edges() {
        let graph = MemoryGraph::new();
        let builder = ConceptGraphBuilder::new(&graph);

        builder.upsert_concepts(&["Solo".to_string()]).await.unwrap();

        let (nodes, edges) = graph.snapshot().await.unwrap();
        assert_eq!(nodes, vec!["Solo"]);
        assert!(edges.is_empty());
    }

    #[tokio::test]
    async fn test_node_names_sorted() {
        let graph = MemoryGraph::new();
        graph.upsert_node(GraphLabel::Concept, "zeta").await.unwrap();
        graph.upsert_node(GraphLabel::Concept, "alpha").await.unwrap();

        let names = graph.node_names(GraphLabel::Concept).await.unwrap();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }
}
