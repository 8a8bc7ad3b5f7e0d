//! Text extraction from uploaded files.
//!
//! Extraction sits outside the ranking core: callers turn file bytes into
//! [`Document`](crate::ranking::Document)s before ranking, and a failure here
//! becomes that document's error result instead of a request failure.

pub mod error;

pub use error::ExtractionError;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::panic::AssertUnwindSafe;
use tracing::{debug, warn};

/// Converts raw file bytes into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError>;
}

/// PDF text layer extraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextExtractor;

impl TextExtractor for PdfTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.is_empty() {
            return Err(ExtractionError::NoContent);
        }

        let text = parse_pdf_guarded(bytes, pdf_extract::extract_text_from_mem)?;

        debug!(bytes = bytes.len(), chars = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

/// Runs `parse`, turning a parser panic into [`ExtractionError::Pdf`].
///
/// pdf-extract panics on some malformed inputs. The panic hook has already
/// printed to stderr by the time it is caught here, hence the warning.
fn parse_pdf_guarded<F, E>(bytes: &[u8], parse: F) -> Result<String, ExtractionError>
where
    F: FnOnce(&[u8]) -> Result<String, E>,
    E: std::fmt::Display,
{
    match std::panic::catch_unwind(AssertUnwindSafe(|| parse(bytes))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf {
            reason: e.to_string(),
        }),
        Err(payload) => {
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_default();
            warn!(
                bytes = bytes.len(),
                panic = %detail,
                "PDF parser panicked on malformed upload; recorded as extraction failure"
            );
            Err(ExtractionError::Pdf {
                reason: "parser panicked on malformed PDF".to_string(),
            })
        }
    }
}

/// UTF-8 passthrough for `.txt` / `.md` uploads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        String::from_utf8(bytes.to_vec()).map_err(|_| ExtractionError::NotUtf8)
    }
}

/// Decodes a base64 upload, accepting bare base64 or a `data:<mime>;base64,<payload>` URL.
pub fn decode_base64_upload(content: &str) -> Result<Vec<u8>, ExtractionError> {
    let payload = match content.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => content,
    };

    STANDARD
        .decode(payload.trim())
        .map_err(|e| ExtractionError::InvalidBase64 {
            reason: e.to_string(),
        })
}
