//! Configuration for the document Q&A system

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main system configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RagConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Text chunking configuration
    pub chunking: ChunkingConfig,
    /// Ollama/LLM configuration
    pub llm: LlmConfig,
    /// Durable vector store configuration
    pub vector_db: VectorDbConfig,
    /// Graph store configuration
    pub graph_db: GraphDbConfig,
    /// Relevance filter configuration
    pub relevance: RelevanceConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 50MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 50 * 1024 * 1024,
        }
    }
}

/// Text chunking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk size in characters
    pub chunk_size: usize,
    /// Overlap between consecutive chunks in characters
    pub chunk_overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 50,
        }
    }
}

/// LLM (Ollama) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Embedding model name
    pub embed_model: String,
    /// Generation model name
    pub generate_model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            embed_model: "nomic-embed-text".to_string(),
            generate_model: "phi3".to_string(),
            temperature: 0.3,
            timeout_secs: 300,
        }
    }
}

/// Durable vector store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorDbConfig {
    /// Fixed on-disk path for the vector store; its presence decides
    /// "load existing index" vs "start fresh" at startup
    pub storage_path: PathBuf,
    /// Sidecar path for the last-ingested chunk list
    pub chunks_data_path: PathBuf,
    /// Number of nearest chunks returned per query
    pub top_k: usize,
}

impl Default for VectorDbConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kgraph-rag");

        Self {
            storage_path: data_dir.join("vectors.db"),
            chunks_data_path: data_dir.join("chunks_data.json"),
            top_k: 3,
        }
    }
}

/// Graph store (Bolt) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphDbConfig {
    /// Bolt URI of the graph store
    pub uri: String,
    /// Username
    pub user: String,
    /// Password
    pub password: String,
}

impl Default for GraphDbConfig {
    fn default() -> Self {
        Self {
            uri: std::env::var("GRAPH_DB_URI").unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            user: std::env::var("GRAPH_DB_USER").unwrap_or_else(|_| "neo4j".to_string()),
            password: std::env::var("GRAPH_DB_PASSWORD").unwrap_or_else(|_| "Test1234".to_string()),
        }
    }
}

/// Relevance filter configuration
///
/// The phrase lists and thresholds are data, not logic: classification must be
/// reproducible bit-for-bit given the same configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelevanceConfig {
    /// Minimum trimmed content length for a retrieved chunk to count as meaningful
    pub min_content_len: usize,
    /// Minimum word count for a retrieved chunk to count as meaningful
    pub min_word_count: usize,
    /// Content prefixes reserved for placeholder/test fixtures
    pub placeholder_prefixes: Vec<String>,
    /// Lower-cased phrases that mark a question as general-knowledge bait
    pub general_topics: Vec<String>,
    /// Markup/script markers checked against the question text
    pub injection_markers: Vec<String>,
}

impl Default for RelevanceConfig {
    fn default() -> Self {
        Self {
            min_content_len: 50,
            min_word_count: 5,
            placeholder_prefixes: vec!["Test".to_string(), "grains".to_string()],
            general_topics: [
                "who is",
                "what is",
                "when did",
                "where is",
                "how old",
                "birthday",
                "born",
                "died",
                "founded",
                "ceo",
                "president",
                "elon musk",
                "tesla",
                "spacex",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            injection_markers: vec![
                "<script>".to_string(),
                "javascript:".to_string(),
                "alert(".to_string(),
            ],
        }
    }
}
