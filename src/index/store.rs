//! Durable chunk storage with similarity search

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::types::{Chunk, ChunkMetadata};

/// A chunk returned from similarity search
#[derive(Debug, Clone)]
pub struct RetrievedChunk {
    /// Chunk text content
    pub content: String,
    /// Chunk metadata
    pub metadata: ChunkMetadata,
    /// Cosine similarity to the query (higher is nearer)
    pub similarity: f32,
}

/// SQLite-backed store of chunk content, metadata, and embeddings
pub struct ChunkStore {
    conn: Arc<Mutex<Connection>>,
}

impl ChunkStore {
    /// Create or open the store at the given path
    pub fn open_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::index_build(format!("create storage dir: {}", e)))?;
        }

        let conn = Connection::open(path)
            .map_err(|e| Error::index_build(format!("open store: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    /// Attempt to open a persisted store at startup.
    ///
    /// Returns `Ok(None)` when the path is absent or holds no entries; an
    /// unreadable store is logged as a warning and also yields `Ok(None)`
    /// rather than an error.
    pub fn open_existing<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        if !path.as_ref().exists() {
            tracing::info!("No existing index at {:?}, starting fresh", path.as_ref());
            return Ok(None);
        }

        match Self::open_or_create(&path) {
            Ok(store) => {
                let count = store.len()?;
                if count == 0 {
                    tracing::info!("Existing index at {:?} is empty", path.as_ref());
                    return Ok(None);
                }
                tracing::info!("Loaded existing index with {} entries", count);
                Ok(Some(store))
            }
            Err(e) => {
                tracing::warn!("Could not load existing index: {}", e);
                Ok(None)
            }
        }
    }

    /// Create an in-memory store (for testing)
    #[cfg(test)]
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| Error::index_build(format!("open in-memory store: {}", e)))?;

        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock();

        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;

            CREATE TABLE IF NOT EXISTS chunks (
                id TEXT PRIMARY KEY,
                document TEXT NOT NULL,
                chunk_index INTEGER NOT NULL,
                total_pages INTEGER,
                content TEXT NOT NULL,
                embedding BLOB NOT NULL,
                ingested_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| Error::index_build(format!("migrate store: {}", e)))?;

        Ok(())
    }

    /// Insert a chunk with its embedding
    pub fn insert(&self, chunk: &Chunk, embedding: &[f32]) -> Result<()> {
        if embedding.is_empty() {
            return Err(Error::index_build("chunk has no embedding"));
        }

        let conn = self.conn.lock();
        conn.execute(
            "INSERT OR REPLACE INTO chunks (id, document, chunk_index, total_pages, content, embedding, ingested_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                chunk.id.to_string(),
                chunk.metadata.document,
                chunk.metadata.chunk_index,
                chunk.metadata.total_pages,
                chunk.content,
                embedding_to_blob(embedding),
                chrono::Utc::now().to_rfc3339(),
            ],
        )
        .map_err(|e| Error::index_build(format!("insert chunk: {}", e)))?;

        Ok(())
    }

    /// Number of stored entries
    pub fn len(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM chunks", [], |row| row.get(0))
            .map_err(|e| Error::index_build(format!("count chunks: {}", e)))?;
        Ok(count as usize)
    }

    /// Check if the store has no entries
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Rank all stored chunks by cosine similarity to the query embedding,
    /// nearest-first, returning at most `top_k`.
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<RetrievedChunk>> {
        let conn = self.conn.lock();

        let mut statement = conn
            .prepare("SELECT document, chunk_index, total_pages, content, embedding FROM chunks")
            .map_err(|e| Error::retrieval(format!("prepare search: {}", e)))?;

        let rows = statement
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, Option<u32>>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, Vec<u8>>(4)?,
                ))
            })
            .map_err(|e| Error::retrieval(format!("search: {}", e)))?;

        let mut results = Vec::new();
        for row in rows {
            let (document, chunk_index, total_pages, content, blob) =
                row.map_err(|e| Error::retrieval(format!("search row: {}", e)))?;

            let embedding = blob_to_embedding(&blob);
            let similarity = cosine_similarity(query_embedding, &embedding);

            results.push(RetrievedChunk {
                content,
                metadata: ChunkMetadata {
                    document,
                    chunk_index,
                    total_pages,
                },
                similarity,
            });
        }

        results.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);

        Ok(results)
    }
}

/// Encode an embedding as little-endian f32 bytes
fn embedding_to_blob(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Decode little-endian f32 bytes back into an embedding
fn blob_to_embedding(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
        .collect()
}

/// Cosine similarity; zero-magnitude vectors compare as 0.0
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}
