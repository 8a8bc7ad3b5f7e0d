//! Embedding provider.
//!
//! - [`Embedder`] is the seam the ranker depends on.
//! - [`BertEmbedder`] is the model-backed implementation (with a stub mode).
//! - [`CachedEmbedder`] optionally memoizes any embedder.

/// BERT sentence encoder (mean pooling).
pub mod bert;
pub mod cache;
pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod embedder;
mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Tokenizer loading and vector helpers.
pub mod utils;

#[cfg(test)]
mod tests;

pub use cache::CachedEmbedder;
pub use config::EmbedderConfig;
pub use embedder::{BertEmbedder, Embedder};
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEmbedder, vector_for_percent};
