//! Wire types for `POST /v1/rank`.

use serde::{Deserialize, Serialize};

use crate::extract::{TextExtractor, decode_base64_upload};
use crate::ranking::{BatchSummary, Document, MatchResult, RankedBatch};
use crate::scoring::Tier;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankRequest {
    pub job_description: String,
    pub documents: Vec<DocumentPayload>,
}

/// One uploaded candidate. `text` wins when both fields are present.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentPayload {
    pub id: String,
    #[serde(default)]
    pub text: Option<String>,
    /// Bare base64 or a `data:application/pdf;base64,...` URL.
    #[serde(default)]
    pub pdf_base64: Option<String>,
}

impl DocumentPayload {
    /// Resolves the upload to text. Decode and extraction failures produce an
    /// unreadable document so the rest of the batch still ranks.
    pub fn into_document(self, pdf_extractor: &dyn TextExtractor) -> Document {
        let Self {
            id,
            text,
            pdf_base64,
        } = self;

        match (text, pdf_base64) {
            (Some(text), _) => Document::new(id, text),
            (None, Some(encoded)) => match decode_base64_upload(&encoded) {
                Ok(bytes) => Document::extract(id, &bytes, pdf_extractor),
                Err(e) => Document::unreadable(id, e.to_string()),
            },
            (None, None) => Document::unreadable(id, "document has neither text nor pdf_base64"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPayload {
    pub id: String,
    pub score: f64,
    pub tier: Tier,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&MatchResult> for ResultPayload {
    fn from(result: &MatchResult) -> Self {
        Self {
            id: result.id().to_string(),
            score: result.score(),
            tier: result.tier(),
            recommendation: result.recommendation(),
            error: result.error().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryPayload {
    pub top_score: f64,
    pub count: usize,
}

impl From<BatchSummary> for SummaryPayload {
    fn from(summary: BatchSummary) -> Self {
        Self {
            top_score: summary.top_score(),
            count: summary.count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankResponse {
    pub results: Vec<ResultPayload>,
    pub summary: SummaryPayload,
}

impl From<RankedBatch> for RankResponse {
    fn from(batch: RankedBatch) -> Self {
        let (results, summary) = batch.into_parts();
        Self {
            results: results.iter().map(ResultPayload::from).collect(),
            summary: summary.into(),
        }
    }
}
