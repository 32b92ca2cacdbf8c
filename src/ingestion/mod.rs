//! Document loading and chunk segmentation

mod loader;
mod splitter;

pub use loader::{DocumentLoader, LoadedDocument};
pub use splitter::TextSplitter;

use std::path::Path;

use crate::config::ChunkingConfig;
use crate::error::Result;
use crate::types::{Chunk, ChunkMetadata, FileType};

/// Load a document from disk and split it into ordered chunks.
///
/// Dispatch is by file type: PDF gets page-aware extraction, every
/// plain-text-like type is loaded as UTF-8. The returned chunk order is
/// meaningful downstream (adjacency drives concept-graph edges).
pub fn load_and_split(
    path: &Path,
    filename: &str,
    file_type: &FileType,
    config: &ChunkingConfig,
) -> Result<Vec<Chunk>> {
    let loaded = DocumentLoader::load(path, filename, file_type)?;
    let splitter = TextSplitter::new(config.chunk_size, config.chunk_overlap);

    let chunks = splitter
        .split(&loaded.content)
        .into_iter()
        .enumerate()
        .map(|(i, content)| {
            Chunk::new(
                content,
                ChunkMetadata {
                    document: filename.to_string(),
                    chunk_index: i as u32,
                    total_pages: loaded.total_pages,
                },
            )
        })
        .collect();

    Ok(chunks)
}
