//! Cross-cutting, shared constants.
//!
//! Tier thresholds and runtime limits here are defaults only; [`crate::config::Config`]
//! overrides them from the environment.

/// Embedding dimension of the stub backend (matches MiniLM / e5-small checkpoints).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Token limit applied by the tokenizer before inference.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Lower bound (inclusive) of the StrongFit tier.
pub const DEFAULT_STRONG_FIT_THRESHOLD: f64 = 75.0;

/// Lower bound (inclusive) of the ModerateFit tier.
pub const DEFAULT_MODERATE_FIT_THRESHOLD: f64 = 50.0;

/// Upper bound of the score domain.
pub const MAX_SCORE: f64 = 100.0;

/// Per-batch document workers.
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

pub const DEFAULT_EMBED_TIMEOUT_MS: u64 = 30_000;

/// Embedding cache entries (0 = disabled).
pub const DEFAULT_EMBED_CACHE_CAPACITY: u64 = 0;

pub const DEFAULT_PORT: u16 = 8050;

/// Request body limit for the rank endpoint (base64 PDFs inflate by ~4/3).
pub const MAX_REQUEST_BODY_BYTES: usize = 25 * 1024 * 1024;

pub const RESUMATCH_STATUS_HEADER: &str = "x-resumatch-status";
pub const RESUMATCH_STATUS_HEALTHY: &str = "healthy";
pub const RESUMATCH_STATUS_READY: &str = "ready";
pub const RESUMATCH_STATUS_RANKED: &str = "ranked";
