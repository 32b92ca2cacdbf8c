//! Document and chunk types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Supported file types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// PDF document (page-aware extraction)
    Pdf,
    /// Plain text file
    Txt,
    /// Markdown file
    Markdown,
    /// HTML document (loaded as plain text)
    Html,
    /// CSS stylesheet
    Css,
    /// JSON data
    Json,
    /// XML data
    Xml,
    /// Source code file with language
    Code(String),
    /// Unknown file type
    Unknown,
}

impl FileType {
    /// Detect file type from extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "txt" | "text" => Self::Txt,
            "md" | "markdown" => Self::Markdown,
            "html" | "htm" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "xml" => Self::Xml,
            "py" => Self::Code("python".to_string()),
            "js" => Self::Code("javascript".to_string()),
            "rs" => Self::Code("rust".to_string()),
            _ => Self::Unknown,
        }
    }

    /// Detect file type from a filename
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename.rsplit('.').next().unwrap_or("");
        // A name with no dot has no extension to dispatch on
        if ext == filename {
            return Self::Unknown;
        }
        Self::from_extension(ext)
    }

    /// Check if this is a supported file type
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Whether this type carries page structure worth extracting
    pub fn is_paged(&self) -> bool {
        matches!(self, Self::Pdf)
    }

    /// Get display name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Pdf => "PDF",
            Self::Txt => "Text File",
            Self::Markdown => "Markdown",
            Self::Html => "HTML",
            Self::Css => "CSS",
            Self::Json => "JSON",
            Self::Xml => "XML",
            Self::Code(lang) => lang.as_str(),
            Self::Unknown => "Unknown",
        }
    }
}

/// Metadata carried alongside a chunk in the vector store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source document filename
    pub document: String,
    /// Position of the chunk within its ingestion (insertion order is
    /// meaningful: adjacency drives concept-graph edges)
    pub chunk_index: u32,
    /// Total pages of the source document, when page-aware
    pub total_pages: Option<u32>,
}

/// An ordered unit of text produced by splitting a document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chunk {
    /// Unique chunk ID
    pub id: Uuid,
    /// Text content
    pub content: String,
    /// Source metadata
    pub metadata: ChunkMetadata,
}

impl Chunk {
    /// Create a new chunk
    pub fn new(content: String, metadata: ChunkMetadata) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_extensions() {
        assert_eq!(FileType::from_extension("pdf"), FileType::Pdf);
        assert_eq!(FileType::from_extension("MD"), FileType::Markdown);
        assert_eq!(FileType::from_extension("py"), FileType::Code("python".to_string()));
        assert_eq!(FileType::from_extension("exe"), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
    }

    #[test]
    fn test_filename_without_extension() {
        assert_eq!(FileType::from_filename("Makefile"), FileType::Unknown);
        assert_eq!(FileType::from_filename("notes.txt"), FileType::Txt);
    }
}
