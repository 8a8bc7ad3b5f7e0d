//! Resumatch library crate (used by the server binary and integration tests).
//!
//! Ranks candidate documents against a job description by embedding both,
//! scoring cosine similarity on a 0-100 scale, and bucketing scores into
//! fit tiers.
//!
//! ## Pipeline
//! - [`TextNormalizer`] - whitespace cleanup and optional query/passage prefixes
//! - [`Embedder`], [`BertEmbedder`], [`CachedEmbedder`] - embedding generation
//! - [`similarity_percent`], [`Classifier`] - scoring and tiers
//! - [`BatchRanker`] - concurrent per-document scoring with failure isolation
//!
//! ## Around the core
//! - [`Config`] - environment configuration
//! - [`TextExtractor`] - PDF and plain-text extraction for uploads
//! - [`gateway`] - Axum HTTP surface
//!
//! ## Test/Mock Support
//! [`embedding::MockEmbedder`] is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod extract;
pub mod gateway;
pub mod normalize;
pub mod ranking;
pub mod scoring;

pub use config::{Config, ConfigError};
pub use embedding::{BertEmbedder, CachedEmbedder, Embedder, EmbedderConfig, EmbeddingError};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{MockEmbedder, vector_for_percent};
pub use extract::{ExtractionError, PdfTextExtractor, PlainTextExtractor, TextExtractor};
pub use normalize::{PrefixStyle, Role, TextNormalizer};
pub use ranking::{
    BatchRanker, BatchSummary, Document, DocumentBody, DocumentError, MatchResult, RankError,
    RankedBatch, RankerConfig,
};
pub use scoring::{
    Classifier, ScoringError, Tier, TierThresholds, cosine_similarity, similarity_percent,
};
