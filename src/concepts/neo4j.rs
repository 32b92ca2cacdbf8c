//! Bolt-protocol graph store backend

use async_trait::async_trait;
use neo4rs::{query, Graph};

use crate::config::GraphDbConfig;
use crate::error::{Error, Result};
use crate::types::GraphEdge;

use super::graph::{GraphLabel, GraphStore, Relation};

/// Graph store backed by a Neo4j-compatible server over Bolt
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    /// Connect to the configured graph server
    pub async fn connect(config: &GraphDbConfig) -> Result<Self> {
        let graph = Graph::new(&config.uri, &config.user, &config.password)
            .await
            .map_err(|e| Error::graph(format!("connect to {}: {}", config.uri, e)))?;

        Ok(Self { graph })
    }
}

#[async_trait]
impl GraphStore for Neo4jGraph {
    async fn upsert_node(&self, label: GraphLabel, name: &str) -> Result<()> {
        // Labels cannot be bind parameters; the text comes from the
        // whitelist enum only.
        let cypher = format!("MERGE (n:{} {{name: $name}})", label.as_str());

        self.graph
            .run(query(&cypher).param("name", name))
            .await
            .map_err(|e| Error::graph(format!("node upsert: {}", e)))
    }

    async fn upsert_edge(&self, from: &str, to: &str, rel: Relation) -> Result<()> {
        let cypher = format!(
            "MATCH (a {{name: $from_name}}), (b {{name: $to_name}}) \
             MERGE (a)-[r:{}]->(b)",
            rel.as_str()
        );

        self.graph
            .run(query(&cypher).param("from_name", from).param("to_name", to))
            .await
            .map_err(|e| Error::graph(format!("edge upsert: {}", e)))
    }

    async fn node_names(&self, label: GraphLabel) -> Result<Vec<String>> {
        let cypher = format!(
            "MATCH (n:{}) RETURN n.name AS name ORDER BY n.name",
            label.as_str()
        );

        let mut rows = self
            .graph
            .execute(query(&cypher))
            .await
            .map_err(|e| Error::graph(format!("node query: {}", e)))?;

        let mut names = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| Error::graph(format!("node query: {}", e)))?
        {
            let name: String = row
                .get("name")
                .map_err(|e| Error::graph(format!("node row: {}", e)))?;
            names.push(name);
        }

        Ok(names)
    }

    async fn snapshot(&self) -> Result<(Vec<String>, Vec<GraphEdge>)> {
        let mut node_rows = self
            .graph
            .execute(query("MATCH (n) RETURN n.name AS name"))
            .await
            .map_err(|e| Error::graph(format!("snapshot nodes: {}", e)))?;

        let mut nodes = Vec::new();
        while let Some(row) = node_rows
            .next()
            .await
            .map_err(|e| Error::graph(format!("snapshot nodes: {}", e)))?
        {
            let name: String = row
                .get("name")
                .map_err(|e| Error::graph(format!("snapshot node row: {}", e)))?;
            nodes.push(name);
        }

        let mut edge_rows = self
            .graph
            .execute(query(
                "MATCH (a)-[r]->(b) \
                 RETURN a.name AS from, type(r) AS rel, b.name AS to",
            ))
            .await
            .map_err(|e| Error::graph(format!("snapshot edges: {}", e)))?;

        let mut edges = Vec::new();
        while let Some(row) = edge_rows
            .next()
            .await
            .map_err(|e| Error::graph(format!("snapshot edges: {}", e)))?
        {
            let from: String = row
                .get("from")
                .map_err(|e| Error::graph(format!("snapshot edge row: {}", e)))?;
            let to: String = row
                .get("to")
                .map_err(|e| Error::graph(format!("snapshot edge row: {}", e)))?;
            let rel: String = row
                .get("rel")
                .map_err(|e| Error::graph(format!("snapshot edge row: {}", e)))?;
            edges.push(GraphEdge { from, to, rel });
        }

        Ok((nodes, edges))
    }
}
