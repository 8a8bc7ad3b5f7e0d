use std::sync::Arc;

use crate::extract::{PdfTextExtractor, TextExtractor};
use crate::ranking::BatchRanker;

#[derive(Clone)]
pub struct HandlerState {
    pub ranker: Arc<BatchRanker>,

    /// Turns decoded `pdf_base64` uploads into text.
    pub pdf_extractor: Arc<dyn TextExtractor>,
}

impl HandlerState {
    pub fn new(ranker: Arc<BatchRanker>) -> Self {
        Self {
            ranker,
            pdf_extractor: Arc::new(PdfTextExtractor),
        }
    }

    pub fn with_pdf_extractor(mut self, extractor: Arc<dyn TextExtractor>) -> Self {
        self.pdf_extractor = extractor;
        self
    }
}
