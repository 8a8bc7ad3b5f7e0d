//! HTTP gateway (Axum) for batch ranking.
//!
//! This module is primarily used by the `resumatch` server binary.

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;


use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::{HeaderMap, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::rank_handler;
pub use state::HandlerState;

use crate::constants::{
    MAX_REQUEST_BODY_BYTES, RESUMATCH_STATUS_HEADER, RESUMATCH_STATUS_HEALTHY,
    RESUMATCH_STATUS_READY,
};

pub fn create_router_with_state(state: HandlerState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/v1/rank", post(rank_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub embedder_mode: &'static str,
    pub embedding_dim: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        RESUMATCH_STATUS_HEADER,
        HeaderValue::from_static(RESUMATCH_STATUS_HEALTHY),
    );

    (
        StatusCode::OK,
        headers,
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

/// The embedder is loaded before the listener binds, so a serving process is ready.
#[tracing::instrument(skip(state))]
pub async fn ready_handler(State(state): State<HandlerState>) -> Response {
    let embedder = state.ranker.embedder();
    let embedder_mode = if embedder.is_stub() { "stub" } else { "model" };

    let mut headers = HeaderMap::new();
    headers.insert(
        RESUMATCH_STATUS_HEADER,
        HeaderValue::from_static(RESUMATCH_STATUS_READY),
    );

    (
        StatusCode::OK,
        headers,
        Json(ReadyResponse {
            status: "ok",
            embedder_mode,
            embedding_dim: embedder.embedding_dim(),
        }),
    )
        .into_response()
}
