use serde::Serialize;

use crate::extract::TextExtractor;
use crate::scoring::{Classifier, Tier};

use super::error::DocumentError;

/// Per-document result before classification: a score or the reason there is none.
pub type DocumentOutcome = Result<f64, DocumentError>;

#[derive(Debug, Clone, PartialEq)]
pub enum DocumentBody {
    /// Extracted text (may be empty).
    Text(String),
    /// Upstream extraction failed; carries the reason.
    Unreadable(String),
}

/// One candidate submitted for ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub body: DocumentBody,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: DocumentBody::Text(text.into()),
        }
    }

    pub fn unreadable(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            body: DocumentBody::Unreadable(reason.into()),
        }
    }

    /// Runs `extractor` over file bytes; an extraction error makes the document unreadable.
    pub fn extract(id: impl Into<String>, bytes: &[u8], extractor: &dyn TextExtractor) -> Self {
        let id = id.into();
        match extractor.extract(bytes) {
            Ok(text) => Self::new(id, text),
            Err(e) => Self::unreadable(id, e.to_string()),
        }
    }
}

/// Score and recommendation for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    id: String,
    score: f64,
    tier: Tier,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl MatchResult {
    fn from_outcome(id: String, outcome: DocumentOutcome, classifier: &Classifier) -> Self {
        match outcome {
            Ok(score) => Self {
                id,
                score,
                tier: classifier.classify(score),
                error: None,
            },
            Err(e) => Self {
                id,
                score: 0.0,
                tier: Tier::PoorFit,
                error: Some(e.to_string()),
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// 0-100; `0.0` for errored documents.
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Display text: the tier label, or `Error: ...` for failed documents.
    pub fn recommendation(&self) -> String {
        match &self.error {
            Some(error) => format!("Error: {}", error),
            None => self.tier.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    top_score: f64,
    count: usize,
}

impl BatchSummary {
    pub fn top_score(&self) -> f64 {
        self.top_score
    }

    /// Number of results, errored ones included.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Ranked results for one request plus their summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedBatch {
    results: Vec<MatchResult>,
    summary: BatchSummary,
}

impl RankedBatch {
    /// Classifies outcomes (given in submission order), sorts them by score
    /// descending, and summarizes.
    ///
    /// The sort is stable, so equal scores keep submission order.
    pub fn from_outcomes(
        outcomes: impl IntoIterator<Item = (String, DocumentOutcome)>,
        classifier: &Classifier,
    ) -> Self {
        let mut results: Vec<MatchResult> = outcomes
            .into_iter()
            .map(|(id, outcome)| MatchResult::from_outcome(id, outcome, classifier))
            .collect();

        results.sort_by(|a, b| b.score.total_cmp(&a.score));

        let summary = BatchSummary {
            top_score: results.first().map_or(0.0, |r| r.score),
            count: results.len(),
        };

        Self { results, summary }
    }

    pub fn results(&self) -> &[MatchResult] {
        &self.results
    }

    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    pub fn into_parts(self) -> (Vec<MatchResult>, BatchSummary) {
        (self.results, self.summary)
    }
}
