//! Deterministic offline fakes for the provider seams

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::concepts::{GraphLabel, GraphStore, Relation};
use crate::error::{Error, Result};
use crate::providers::{CompletionProvider, EmbeddingProvider};
use crate::types::GraphEdge;

/// Embedder producing a deterministic byte-frequency vector.
///
/// Identical text always embeds identically, so self-retrieval ranks the
/// exact chunk first. Can be toggled to fail for error-path tests.
pub struct FlakyEmbedder {
    fail: AtomicBool,
}

impl FlakyEmbedder {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent embed calls fail (or succeed again)
    pub fn fail_next(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl EmbeddingProvider for FlakyEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::llm("embedding backend offline"));
        }

        let mut vector = vec![0.0f32; 32];
        for (position, byte) in text.bytes().enumerate() {
            vector[(byte as usize) % 32] += 1.0 + (position % 7) as f32 * 0.01;
        }
        Ok(vector)
    }

    fn name(&self) -> &str {
        "flaky-test-embedder"
    }
}

/// Completion model returning a fixed reply
pub struct CannedLlm {
    reply: String,
}

impl CannedLlm {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
        }
    }
}

#[async_trait]
impl CompletionProvider for CannedLlm {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.reply.clone())
    }

    fn name(&self) -> &str {
        "canned-test-llm"
    }
}

/// Graph store whose writes always fail
pub struct FailingGraph;

#[async_trait]
impl GraphStore for FailingGraph {
    async fn upsert_node(&self, _label: GraphLabel, _name: &str) -> Result<()> {
        Err(Error::graph("graph server unreachable"))
    }

    async fn upsert_edge(&self, _from: &str, _to: &str, _rel: Relation) -> Result<()> {
        Err(Error::graph("graph server unreachable"))
    }

    async fn node_names(&self, _label: GraphLabel) -> Result<Vec<String>> {
        Err(Error::graph("graph server unreachable"))
    }

    async fn snapshot(&self) -> Result<(Vec<String>, Vec<GraphEdge>)> {
        Err(Error::graph("graph server unreachable"))
    }
}
