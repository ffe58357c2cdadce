use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Key-value store failures. Never fatal to the gallery.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid stored JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store file too large: {0} bytes")]
    TooLarge(u64),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Cached shuffle seed record, stored as JSON `{seed, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShuffleSeed {
    pub seed: String,
    /// Creation time, Unix milliseconds.
    pub timestamp: i64,
}

impl ShuffleSeed {
    /// Age at `now_ms`. Negative when the clock moved backwards.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        now_ms.saturating_sub(self.timestamp)
    }

    pub fn is_fresh(&self, now_ms: i64, ttl_ms: i64) -> bool {
        self.age_ms(now_ms) < ttl_ms
    }
}
