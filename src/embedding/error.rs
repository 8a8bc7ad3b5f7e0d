use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The configured model could not be loaded. Fatal at startup.
    #[error("embedding model unavailable at {path}: {reason}")]
    ModelUnavailable { path: PathBuf, reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("embedding inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("cannot embed empty text")]
    EmptyInput,
}

impl EmbeddingError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        EmbeddingError::ModelUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}
