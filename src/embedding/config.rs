use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_EMBEDDING_DIM, DEFAULT_MAX_SEQ_LEN};
use crate::embedding::error::EmbeddingError;

#[derive(Debug, Clone)]
/// Configuration for [`BertEmbedder`](super::BertEmbedder).
pub struct EmbedderConfig {
    /// Model directory (`config.json`, `model.safetensors`, `tokenizer.json`).
    /// `None` selects the deterministic stub backend.
    pub model_dir: Option<PathBuf>,
    /// Tokens kept per input; longer inputs are truncated by the tokenizer.
    pub max_seq_len: usize,
    /// Output dimension of the stub backend. Model backends report their hidden size.
    pub stub_dim: usize,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
            stub_dim: DEFAULT_EMBEDDING_DIM,
        }
    }
}

impl EmbedderConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: Some(model_dir.into()),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self::default()
    }

    /// Uses the model directory selected at startup, or the stub when there is none.
    pub fn from_selection(model_dir: Option<&Path>, max_seq_len: usize) -> Self {
        Self {
            model_dir: model_dir.map(Path::to_path_buf),
            max_seq_len,
            ..Default::default()
        }
    }

    pub fn with_stub_dim(mut self, dim: usize) -> Self {
        self.stub_dim = dim;
        self
    }

    pub fn is_stub(&self) -> bool {
        self.model_dir.is_none()
    }

    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }

        match &self.model_dir {
            None if self.stub_dim == 0 => Err(EmbeddingError::InvalidConfig {
                reason: "stub_dim must be greater than zero".to_string(),
            }),
            None => Ok(()),
            Some(dir) => {
                if dir.as_os_str().is_empty() {
                    return Err(EmbeddingError::InvalidConfig {
                        reason: "model_dir cannot be empty when provided".to_string(),
                    });
                }
                for file in Self::REQUIRED_FILES {
                    if !dir.join(file).is_file() {
                        return Err(EmbeddingError::unavailable(
                            dir.clone(),
                            format!("missing {}", file),
                        ));
                    }
                }
                Ok(())
            }
        }
    }

    const REQUIRED_FILES: [&'static str; 3] =
        ["config.json", "model.safetensors", "tokenizer.json"];
}
