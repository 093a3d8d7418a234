//! Configuration types shared across orchestrators and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Retry and backoff settings for a single logical fetch.
///
/// Backoff is linear: the wait before attempt `n + 1` is `base_delay * n`,
/// optionally widened by random jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first one (>= 1).
    pub max_attempts: u32,
    /// Unit of the linear backoff.
    pub base_delay: Duration,
    /// Random jitter percentage [0, 100] added on top of each delay.
    pub jitter_percent: u8,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
            jitter_percent: 0,
        }
    }
}

/// Global configuration for the `Agile` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgileConfig {
    /// Retry policy applied to every fetch.
    pub retry: RetryConfig,
    /// Look-ahead used by the widget path when picking the cheapest slot.
    pub lowest_rate_window: Duration,
}

impl Default for AgileConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            lowest_rate_window: Duration::from_secs(24 * 60 * 60),
        }
    }
}
