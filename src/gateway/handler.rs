use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{debug, info, instrument};

use crate::constants::{RESUMATCH_STATUS_HEADER, RESUMATCH_STATUS_RANKED};
use crate::gateway::error::GatewayError;
use crate::gateway::payload::{DocumentPayload, RankRequest, RankResponse};
use crate::gateway::state::HandlerState;
use crate::ranking::{BatchRanker, Document};

#[instrument(skip_all, fields(documents = tracing::field::Empty))]
pub async fn rank_handler(
    State(state): State<HandlerState>,
    Json(request): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let request: RankRequest = serde_json::from_value(request)
        .map_err(|e| GatewayError::InvalidRequest(format!("Invalid request schema: {}", e)))?;
    tracing::Span::current().record("documents", request.documents.len());

    let RankRequest {
        job_description,
        documents,
    } = request;

    BatchRanker::validate_request(&job_description, documents.len())?;

    let documents = resolve_documents(&state, documents).await?;
    debug!(count = documents.len(), "Documents resolved");

    let batch = state.ranker.rank(&job_description, documents).await?;
    info!(
        count = batch.summary().count(),
        top_score = batch.summary().top_score(),
        "Rank request served"
    );

    let mut headers = HeaderMap::new();
    headers.insert(
        RESUMATCH_STATUS_HEADER,
        HeaderValue::from_static(RESUMATCH_STATUS_RANKED),
    );

    Ok((StatusCode::OK, headers, Json(RankResponse::from(batch))).into_response())
}

/// Decodes and extracts uploads on the blocking pool; PDF parsing is CPU-bound.
pub(crate) async fn resolve_documents(
    state: &HandlerState,
    payloads: Vec<DocumentPayload>,
) -> Result<Vec<Document>, GatewayError> {
    if payloads.iter().all(|p| p.pdf_base64.is_none() || p.text.is_some()) {
        let extractor = state.pdf_extractor.as_ref();
        return Ok(payloads
            .into_iter()
            .map(|p| p.into_document(extractor))
            .collect());
    }

    let extractor = Arc::clone(&state.pdf_extractor);
    tokio::task::spawn_blocking(move || {
        payloads
            .into_iter()
            .map(|p| p.into_document(extractor.as_ref()))
            .collect()
    })
    .await
    .map_err(|e| GatewayError::InternalError(format!("extraction worker failed: {}", e)))
}
