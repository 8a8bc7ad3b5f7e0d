//! Optional cross-request embedding cache (off unless a capacity is configured).
//!
//! Entries are keyed by the blake3 hash of the prepared text, so role prefixes
//! are part of the key.

use std::sync::Arc;

use moka::sync::Cache;
use tracing::debug;

use super::embedder::Embedder;
use super::error::EmbeddingError;

pub struct CachedEmbedder<E> {
    inner: E,
    cache: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E: Embedder> CachedEmbedder<E> {
    pub fn new(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::new(capacity),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = *blake3::hash(text.as_bytes()).as_bytes();

        if let Some(hit) = self.cache.get(&key) {
            debug!(text_len = text.len(), "Embedding cache hit");
            return Ok(hit.as_ref().clone());
        }

        // Failures are not cached; a later request may succeed.
        let embedding = self.inner.embed(text)?;
        self.cache.insert(key, Arc::new(embedding.clone()));
        Ok(embedding)
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn is_stub(&self) -> bool {
        self.inner.is_stub()
    }
}
