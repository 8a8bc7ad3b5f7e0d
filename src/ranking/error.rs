use thiserror::Error;

use crate::scoring::ScoringError;

/// Request-level failure. Nothing is ranked when one of these is returned.
#[derive(Debug, Error)]
pub enum RankError {
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    #[error("failed to embed job description: {0}")]
    JobDescription(#[source] DocumentError),
}

/// Failure confined to one document; recorded in that document's result.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    #[error("text extraction failed: {reason}")]
    ExtractionFailed { reason: String },

    #[error("document contains no text")]
    EmptyText,

    #[error("embedding failed: {reason}")]
    EmbeddingFailed { reason: String },

    #[error("embedding timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),
}
