//! Document ingestion endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};

use crate::error::{Error, Result};
use crate::pipeline;
use crate::server::state::AppState;
use crate::types::UploadResponse;

/// POST /api/upload - Upload and ingest a single document
pub async fn upload_document(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read file: {}", e)))?;

        tracing::info!("Processing file: {} ({} bytes)", filename, data.len());

        let outcome = pipeline::ingest_document(&state, &filename, &data).await?;

        return Ok(Json(UploadResponse {
            message: outcome.message,
            chunk_count: outcome.chunk_count,
        }));
    }

    Err(Error::Config("No file field in upload".to_string()))
}
