//! Question answering endpoint

use axum::{extract::State, Json};

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{AskRequest, AskResponse};

/// POST /api/ask - Answer a question over the ingested documents
pub async fn ask_question(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>> {
    tracing::info!("Question: \"{}\"", request.question);

    // Capture the current generation once; a concurrent ingestion swap does
    // not affect this request.
    let generation = state.current().ok_or(Error::NotReady)?;

    let answer = generation.engine.answer(&request.question).await?;

    Ok(Json(AskResponse {
        answer: answer.answer,
        relevant_concepts: answer.relevant_concepts,
        answer_source: answer.provenance.source,
        source_message: answer.provenance.message,
        retrieved_docs_count: answer.retrieved_count,
    }))
}
