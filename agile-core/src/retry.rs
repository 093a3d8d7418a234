//! Retry classification and linear backoff.
//!
//! The decision of whether a failure is worth another attempt is a pure
//! function of the error so it can be tested without any IO.

use std::time::Duration;

use rand::Rng;

use crate::{AgileError, RetryConfig};

/// Whether a failed attempt should be followed by another one.
///
/// Transport failures and `Server` statuses (5xx, 408, 429) are transient.
/// Everything else fails the fetch immediately.
#[must_use]
pub const fn should_retry(err: &AgileError) -> bool {
    matches!(err, AgileError::Transport { .. } | AgileError::Server { .. })
}

/// Attempt budget and delays derived from a [`RetryConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    cfg: RetryConfig,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}

impl RetryPolicy {
    /// Build a policy. A zero attempt budget is raised to one.
    #[must_use]
    pub fn new(mut cfg: RetryConfig) -> Self {
        if cfg.max_attempts == 0 {
            cfg.max_attempts = 1;
        }
        Self { cfg }
    }

    /// Total attempts, including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.cfg.max_attempts
    }

    /// Nominal wait before 1-based `attempt`, without jitter.
    ///
    /// Zero for the first attempt, then `base_delay * (attempt - 1)`.
    #[must_use]
    pub fn nominal_delay_before(&self, attempt: u32) -> Duration {
        self.cfg.base_delay.saturating_mul(attempt.saturating_sub(1))
    }

    /// Wait before 1-based `attempt`, with jitter applied when configured.
    #[must_use]
    pub fn delay_before(&self, attempt: u32) -> Duration {
        let nominal = self.nominal_delay_before(attempt);
        if nominal.is_zero() || self.cfg.jitter_percent == 0 {
            return nominal;
        }
        let base_ms = u64::try_from(nominal.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(jitter_wait(base_ms, u32::from(self.cfg.jitter_percent)))
    }
}

fn jitter_wait(base_ms: u64, jitter_percent: u32) -> u64 {
    let jitter_range = std::cmp::max(1, base_ms.saturating_mul(u64::from(jitter_percent)) / 100);
    let mut rng = rand::rng();
    base_ms.saturating_add(rng.random_range(0..jitter_range))
}
