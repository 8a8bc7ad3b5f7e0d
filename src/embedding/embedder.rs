use std::sync::Arc;

use candle_core::Device;
use tracing::{debug, info, warn};

use crate::embedding::bert::SentenceEncoder;
use crate::embedding::config::EmbedderConfig;
use crate::embedding::device::{device_label, select_device};
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{l2_normalize, load_tokenizer};

/// Maps text to a fixed-length vector.
///
/// Implementations are deterministic for a fixed model and input, and are shared
/// read-only across concurrent requests.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Length of every vector returned by [`embed`](Embedder::embed).
    fn embedding_dim(&self) -> usize;

    /// `true` when no real model backs the embeddings.
    fn is_stub(&self) -> bool {
        false
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed(text)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}

enum EmbedderBackend {
    Model {
        encoder: SentenceEncoder,
        tokenizer: Arc<tokenizers::Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedder backed by a BERT checkpoint (or a hash-seeded stub).
pub struct BertEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    dim: usize,
}

impl std::fmt::Debug for BertEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BertEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => {
                        format!("Model({})", device_label(device))
                    }
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("model_dir", &self.config.model_dir)
            .field("embedding_dim", &self.dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl BertEmbedder {
    /// Loads the embedder once at startup.
    ///
    /// A configured model that cannot be loaded yields
    /// [`EmbeddingError::ModelUnavailable`].
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        let Some(model_dir) = config.model_dir.clone() else {
            warn!(dim = config.stub_dim, "Embedder running in STUB mode (no model configured)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                dim: config.stub_dim,
                config,
            });
        };

        let device = select_device()?;
        debug!(device = device_label(&device), "Selected compute device for embedder");

        let encoder = SentenceEncoder::load(&model_dir, &device)
            .map_err(|e| EmbeddingError::unavailable(&model_dir, e))?;
        let tokenizer = load_tokenizer(&model_dir, config.max_seq_len)
            .map_err(|e| EmbeddingError::unavailable(&model_dir, e))?;

        let dim = encoder.hidden_size();
        info!(
            model_dir = %model_dir.display(),
            embedding_dim = dim,
            max_seq_len = config.max_seq_len,
            device = device_label(&device),
            "Embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            dim,
        })
    }

    pub fn stub() -> Self {
        let config = EmbedderConfig::stub();
        Self {
            backend: EmbedderBackend::Stub,
            dim: config.stub_dim,
            config,
        }
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &SentenceEncoder,
        tokenizer: &tokenizers::Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            truncated = !encoding.get_overflowing().is_empty(),
            "Generating embedding"
        );

        let mut embedding = encoder
            .encode(
                encoding.get_ids(),
                encoding.get_type_ids(),
                encoding.get_attention_mask(),
                device,
            )
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let hash = blake3::hash(text.as_bytes());
        let mut seed = [0u8; 8];
        seed.copy_from_slice(&hash.as_bytes()[..8]);
        let mut state = u64::from_le_bytes(seed);

        let mut embedding = Vec::with_capacity(self.dim);
        for _ in 0..self.dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(&mut embedding);
        embedding
    }
}

impl Embedder for BertEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        if text.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}
