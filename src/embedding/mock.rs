//! Scriptable embedder for tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::embedder::Embedder;
use super::error::EmbeddingError;

/// In-memory embedder with fixed vectors, scripted failures, and call counting.
///
/// Texts without a scripted vector get a one-hot vector derived from their
/// length, so unrelated texts are orthogonal.
#[derive(Default)]
pub struct MockEmbedder {
    dim: usize,
    vectors: HashMap<String, Vec<f32>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            ..Default::default()
        }
    }

    /// Returns `vector` whenever `text` is embedded.
    pub fn with_vector(mut self, text: impl Into<String>, vector: Vec<f32>) -> Self {
        self.vectors.insert(text.into(), vector);
        self
    }

    /// Fails with [`EmbeddingError::InferenceFailed`] whenever `text` is embedded.
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        self.failing.insert(text.into());
        self
    }

    /// Blocks the calling thread for `delay` before embedding `text`.
    pub fn with_delay(mut self, text: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(text.into(), delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Texts passed to `embed`, in call order.
    pub fn seen_texts(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

impl Embedder for MockEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().push(text.to_string());

        if let Some(delay) = self.delays.get(text) {
            std::thread::sleep(*delay);
        }

        if self.failing.contains(text) {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!("scripted failure for '{}'", text),
            });
        }

        if let Some(vector) = self.vectors.get(text) {
            return Ok(vector.clone());
        }

        let mut vector = vec![0.0; self.dim];
        if self.dim > 0 {
            vector[text.len() % self.dim] = 1.0;
        }
        Ok(vector)
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        true
    }
}

/// Unit vector whose cosine with `[1, 0]` maps to `percent` on the 0-100 scale.
pub fn vector_for_percent(percent: f64) -> Vec<f32> {
    let cosine = (percent / 100.0) * 2.0 - 1.0;
    let sine = (1.0 - cosine * cosine).max(0.0).sqrt();
    vec![cosine as f32, sine as f32]
}
