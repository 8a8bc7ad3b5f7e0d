use std::time::Duration;

use crate::constants::{DEFAULT_EMBED_TIMEOUT_MS, DEFAULT_MAX_CONCURRENCY};

/// Execution limits for one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankerConfig {
    /// Documents embedded at the same time.
    pub max_concurrency: usize,
    /// Upper bound on a single embedding call.
    pub embed_timeout: Duration,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            embed_timeout: Duration::from_millis(DEFAULT_EMBED_TIMEOUT_MS),
        }
    }
}

impl RankerConfig {
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn with_embed_timeout(mut self, embed_timeout: Duration) -> Self {
        self.embed_timeout = embed_timeout;
        self
    }
}
