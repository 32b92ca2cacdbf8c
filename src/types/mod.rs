//! Core types for the document Q&A system

pub mod document;
pub mod response;

pub use document::{Chunk, ChunkMetadata, FileType};
pub use response::{
    AskRequest, AskResponse, ChunksResponse, GraphEdge, GraphSnapshot, StatusResponse,
    UploadResponse,
};
