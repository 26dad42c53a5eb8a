use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controls what [`TokenManager::validate`](crate::pool::TokenManager::validate) checks on a match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationMode {
    /// Any value held by a slot is accepted, limits are enforced only when `issue` revisits the slot.
    #[default]
    Lenient,
    /// A matching slot is rejected when it is already stale (past its use budget or time-to-live).
    Strict,
}

fn default_capacity() -> usize {
    1
}

/// The token pool configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPoolConfig {
    /// Number of slots in the ring.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Maximum number of uses of a token value, 0 for unlimited.
    #[serde(default)]
    pub max_uses: u32,
    /// Time-to-live of a token value in seconds, 0 to disable time based expiry.
    #[serde(default)]
    pub ttl_seconds: u64,
    #[serde(default)]
    pub validation: ValidationMode,
}

impl TokenPoolConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

impl Default for TokenPoolConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            max_uses: 0,
            ttl_seconds: 0,
            validation: ValidationMode::default(),
        }
    }
}
