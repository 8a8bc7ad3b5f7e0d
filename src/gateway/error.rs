use axum::{
    Json,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::constants::RESUMATCH_STATUS_HEADER;
use crate::ranking::RankError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

impl From<RankError> for GatewayError {
    fn from(err: RankError) -> Self {
        match err {
            RankError::InvalidRequest { reason } => GatewayError::InvalidRequest(reason),
            RankError::JobDescription(inner) => GatewayError::EmbeddingFailed(format!(
                "job description could not be embedded: {}",
                inner
            )),
        }
    }
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::EmbeddingFailed(_) | GatewayError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Value of the status header for this error.
    pub fn status_label(&self) -> &'static str {
        match self {
            GatewayError::InvalidRequest(_) => "invalid_request",
            GatewayError::EmbeddingFailed(_) => "embedding_error",
            GatewayError::InternalError(_) => "internal_error",
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut headers = HeaderMap::new();
        headers.insert(
            RESUMATCH_STATUS_HEADER,
            HeaderValue::from_static(self.status_label()),
        );

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });

        (status, headers, body).into_response()
    }
}
