//! File loading with per-type text extraction

use std::path::Path;

use crate::error::{Error, Result};
use crate::types::FileType;

/// Text extracted from a file on disk
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Extracted text content
    pub content: String,
    /// Total pages, when the format is page-aware
    pub total_pages: Option<u32>,
}

/// Loads files into plain text
pub struct DocumentLoader;

impl DocumentLoader {
    /// Load a file based on its declared type.
    ///
    /// Unsupported types are rejected here as a backstop; callers are expected
    /// to have validated the extension before any I/O.
    pub fn load(path: &Path, filename: &str, file_type: &FileType) -> Result<LoadedDocument> {
        match file_type {
            FileType::Pdf => Self::load_pdf(path, filename),
            FileType::Unknown => Err(Error::UnsupportedFileType(filename.to_string())),
            _ => Self::load_text(path),
        }
    }

    /// Extract text from a PDF, tracking the page count
    fn load_pdf(path: &Path, filename: &str) -> Result<LoadedDocument> {
        let content = pdf_extract::extract_text(path)
            .map_err(|e| Error::file_parse(filename, e.to_string()))?;

        let total_pages = match lopdf::Document::load(path) {
            Ok(doc) => Some(doc.get_pages().len() as u32),
            Err(_) => Some(1),
        };

        Ok(LoadedDocument {
            content,
            total_pages,
        })
    }

    /// Load any plain-text-like file as UTF-8
    fn load_text(path: &Path) -> Result<LoadedDocument> {
        let bytes = std::fs::read(path)?;
        let content = String::from_utf8_lossy(&bytes).to_string();

        Ok(LoadedDocument {
            content,
            total_pages: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_text_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "First paragraph.\n\nSecond paragraph.").unwrap();

        let loaded =
            DocumentLoader::load(file.path(), "notes.txt", &FileType::Txt).unwrap();
        assert!(loaded.content.starts_with("First paragraph."));
        assert_eq!(loaded.total_pages, None);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err =
            DocumentLoader::load(file.path(), "binary.exe", &FileType::Unknown).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFileType(_)));
    }
}
