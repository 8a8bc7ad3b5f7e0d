use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to extract PDF text: {reason}")]
    Pdf { reason: String },

    #[error("document is not valid UTF-8 text")]
    NotUtf8,

    #[error("invalid base64 payload: {reason}")]
    InvalidBase64 { reason: String },

    #[error("document has no content")]
    NoContent,
}
