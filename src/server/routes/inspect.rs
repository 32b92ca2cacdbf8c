//! Read-only inspection endpoints

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{ChunksResponse, GraphSnapshot, StatusResponse};

/// GET /api/status - Readiness flags and chunk count
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let generation = state.current();
    let ready = generation.is_some();

    Json(StatusResponse {
        system_ready: ready,
        chunks_count: generation.map(|g| g.chunks.len()).unwrap_or(0),
        has_index: ready,
        has_retriever: ready,
        has_chain: ready,
    })
}

/// GET /api/chunks - Full current chunk content list
pub async fn chunks(State(state): State<AppState>) -> Result<Json<ChunksResponse>> {
    let generation = state.current().ok_or(Error::NotReady)?;

    if generation.chunks.is_empty() {
        return Err(Error::NotReady);
    }

    Ok(Json(ChunksResponse {
        chunks: generation.chunks.clone(),
    }))
}

/// GET /api/graph - Concept graph snapshot
pub async fn graph(State(state): State<AppState>) -> Result<Json<GraphSnapshot>> {
    let (nodes, edges) = state.graph().snapshot().await?;

    if nodes.is_empty() {
        return Err(Error::NotReady);
    }

    Ok(Json(GraphSnapshot { nodes, edges }))
}
