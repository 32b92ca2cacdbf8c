//! API routes for the Q&A server

pub mod ingest;
pub mod inspect;
pub mod query;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Ingestion - with larger body limit for file uploads
        .route(
            "/upload",
            post(ingest::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Question answering
        .route("/ask", post(query::ask_question))
        // Inspection
        .route("/status", get(inspect::status))
        .route("/chunks", get(inspect::chunks))
        .route("/graph", get(inspect::graph))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "kgraph-rag",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Document Q&A with concept graph extraction and provenance-labeled answers",
        "endpoints": {
            "POST /api/upload": "Upload and ingest a document",
            "POST /api/ask": "Ask a question over ingested documents",
            "GET /api/status": "Readiness flags and chunk count",
            "GET /api/chunks": "Current chunk list",
            "GET /api/graph": "Concept graph snapshot"
        }
    }))
}
