//! Similarity scoring and tier classification.
//!
//! [`similarity_percent`] turns a pair of embeddings into a 0-100 score and
//! [`Classifier`] buckets that score into a [`Tier`]. Both are pure.

pub mod classifier;
pub mod error;
pub mod similarity;


pub use classifier::{Classifier, Tier, TierThresholds};
pub use error::ScoringError;
pub use similarity::{cosine_similarity, similarity_percent};
