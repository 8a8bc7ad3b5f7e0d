use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error, info, instrument, warn};

use crate::embedding::Embedder;
use crate::normalize::{Role, TextNormalizer};
use crate::scoring::{Classifier, ScoringError, similarity_percent};

use super::config::RankerConfig;
use super::error::{DocumentError, RankError};
use super::types::{Document, DocumentBody, DocumentOutcome, RankedBatch};

/// Scores a batch of documents against one job description.
///
/// The embedder is shared; a ranker is cheap to clone and safe to use from
/// concurrent requests.
#[derive(Clone)]
pub struct BatchRanker {
    embedder: Arc<dyn Embedder>,
    normalizer: TextNormalizer,
    classifier: Classifier,
    config: RankerConfig,
}

impl std::fmt::Debug for BatchRanker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchRanker")
            .field("embedding_dim", &self.embedder.embedding_dim())
            .field("embedder_stub", &self.embedder.is_stub())
            .field("normalizer", &self.normalizer)
            .field("classifier", &self.classifier)
            .field("config", &self.config)
            .finish()
    }
}

impl BatchRanker {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder,
            normalizer: TextNormalizer::default(),
            classifier: Classifier::default(),
            config: RankerConfig::default(),
        }
    }

    pub fn with_normalizer(mut self, normalizer: TextNormalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_config(mut self, config: RankerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn embedder(&self) -> &Arc<dyn Embedder> {
        &self.embedder
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Request-level checks run before any extraction or embedding.
    pub fn validate_request(job_description: &str, documents: usize) -> Result<(), RankError> {
        if job_description.trim().is_empty() {
            return Err(RankError::InvalidRequest {
                reason: "job description is empty".to_string(),
            });
        }
        if documents == 0 {
            return Err(RankError::InvalidRequest {
                reason: "no documents submitted".to_string(),
            });
        }
        Ok(())
    }

    /// Ranks `documents` against `job_description`.
    ///
    /// Returns exactly one result per document. Per-document failures become
    /// zero-score results; only an invalid request or a job description that
    /// cannot be embedded fails the whole call. Dropping the returned future
    /// aborts outstanding work.
    #[instrument(skip_all, fields(documents = documents.len()))]
    pub async fn rank(
        &self,
        job_description: &str,
        documents: Vec<Document>,
    ) -> Result<RankedBatch, RankError> {
        Self::validate_request(job_description, documents.len())?;

        let query = self.normalizer.normalize(job_description, Role::Query);
        let query_vector = embed_with_timeout(
            Arc::clone(&self.embedder),
            query,
            self.config.embed_timeout,
            None,
        )
        .await
        .map_err(RankError::JobDescription)?;
        let query_vector: Arc<[f32]> = query_vector.into();

        let total = documents.len();
        let mut ids = Vec::with_capacity(total);
        let mut outcomes: Vec<Option<DocumentOutcome>> = vec![None; total];

        let permits = Arc::new(Semaphore::new(self.config.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        let mut task_index = HashMap::with_capacity(total);

        for (index, document) in documents.into_iter().enumerate() {
            ids.push(document.id);

            let text = match document.body {
                DocumentBody::Text(text) => text,
                DocumentBody::Unreadable(reason) => {
                    outcomes[index] = Some(Err(DocumentError::ExtractionFailed { reason }));
                    continue;
                }
            };

            let passage = self.normalizer.normalize(&text, Role::Passage);
            if passage.is_empty() {
                outcomes[index] = Some(Err(DocumentError::EmptyText));
                continue;
            }

            let embedder = Arc::clone(&self.embedder);
            let query_vector = Arc::clone(&query_vector);
            let permits = Arc::clone(&permits);
            let timeout = self.config.embed_timeout;

            let handle = tasks.spawn(async move {
                let permit = permits.acquire_owned().await.map_err(|e| {
                    DocumentError::EmbeddingFailed {
                        reason: e.to_string(),
                    }
                })?;
                let vector = embed_with_timeout(embedder, passage, timeout, Some(permit)).await?;
                Ok::<_, DocumentError>(similarity_percent(&query_vector, &vector)?)
            });
            task_index.insert(handle.id(), index);
        }

        while let Some(joined) = tasks.join_next_with_id().await {
            match joined {
                Ok((id, outcome)) => {
                    if let Some(&index) = task_index.get(&id) {
                        outcomes[index] = Some(outcome);
                    }
                }
                Err(e) => {
                    // The slot stays empty and is filled in below.
                    error!(error = %e, "Document worker task failed");
                }
            }
        }

        let scored = ids.into_iter().zip(outcomes).map(|(id, outcome)| {
            let outcome = outcome.unwrap_or_else(|| {
                Err(DocumentError::EmbeddingFailed {
                    reason: "document worker did not complete".to_string(),
                })
            });
            log_outcome(&id, &outcome);
            (id, outcome)
        });

        let batch = RankedBatch::from_outcomes(scored.collect::<Vec<_>>(), &self.classifier);

        info!(
            count = batch.summary().count(),
            top_score = batch.summary().top_score(),
            failed = batch.results().iter().filter(|r| r.is_error()).count(),
            "Batch ranked"
        );

        Ok(batch)
    }
}

/// Runs `embed` on the blocking pool, bounded by `limit`.
///
/// A timed-out call is abandoned, not interrupted; its result is discarded.
/// `permit` moves into the blocking closure and is released only when
/// `embed` returns, so abandoned calls still count against the limit.
async fn embed_with_timeout(
    embedder: Arc<dyn Embedder>,
    text: String,
    limit: Duration,
    permit: Option<OwnedSemaphorePermit>,
) -> Result<Vec<f32>, DocumentError> {
    let work = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        embedder.embed(&text)
    });

    match tokio::time::timeout(limit, work).await {
        Err(_) => Err(DocumentError::Timeout {
            after_ms: limit.as_millis() as u64,
        }),
        Ok(Err(join_error)) => Err(DocumentError::EmbeddingFailed {
            reason: format!("embedding worker failed: {}", join_error),
        }),
        Ok(Ok(result)) => result.map_err(|e| DocumentError::EmbeddingFailed {
            reason: e.to_string(),
        }),
    }
}

fn log_outcome(id: &str, outcome: &DocumentOutcome) {
    match outcome {
        Ok(score) => debug!(doc_id = %id, score, "Document scored"),
        Err(DocumentError::Scoring(ScoringError::DimensionMismatch { left, right })) => {
            error!(doc_id = %id, left, right, "Embedding dimension mismatch");
        }
        Err(e) => warn!(doc_id = %id, error = %e, "Document failed"),
    }
}
