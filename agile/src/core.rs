use std::sync::Arc;
use std::time::Duration;

use agile_core::{AgileConfig, AgileError, RateSource, RetryConfig, RetryPolicy};
use chrono::{DateTime, TimeDelta, Utc};

use crate::widget::{self, WidgetRates};
use crate::{PaginationController, RetryingFetcher};

/// Entry point tying a rate source to the retry policy and the query window.
pub struct Agile {
    pub(crate) source: Arc<dyn RateSource>,
    pub(crate) cfg: AgileConfig,
    pub(crate) window: TimeDelta,
}

/// Builder for constructing an [`Agile`] orchestrator.
pub struct AgileBuilder {
    source: Option<Arc<dyn RateSource>>,
    cfg: AgileConfig,
}

impl Default for AgileBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AgileBuilder {
    /// Create a new builder with the default policy.
    ///
    /// Behavior and trade-offs:
    /// - Starts without a source; one must be set via [`with_source`](Self::with_source).
    /// - Defaults: 3 attempts, linear backoff of 2s per failed attempt, no jitter,
    ///   and a 24h look-ahead for the cheapest slot.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            cfg: AgileConfig::default(),
        }
    }

    /// Set the rate source. A later call replaces an earlier one.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn RateSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the retry policy.
    ///
    /// Behavior and trade-offs:
    /// - A zero attempt budget is treated as a single attempt.
    /// - Jitter spreads retries from many clients apart at the cost of less
    ///   predictable timing.
    #[must_use]
    pub const fn retry(mut self, retry: RetryConfig) -> Self {
        self.cfg.retry = retry;
        self
    }

    /// Look-ahead used by [`Agile::widget_rates`] for the cheapest slot.
    #[must_use]
    pub const fn lowest_rate_window(mut self, window: Duration) -> Self {
        self.cfg.lowest_rate_window = window;
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AgileConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `AgileError::Config` when no source was set or the look-ahead
    /// window is out of range.
    pub fn build(self) -> Result<Agile, AgileError> {
        let source = self
            .source
            .ok_or_else(|| AgileError::Config("no rate source configured".into()))?;
        let window = TimeDelta::from_std(self.cfg.lowest_rate_window).map_err(|e| {
            AgileError::Config(format!(
                "lowest_rate_window {:?} out of range: {e}",
                self.cfg.lowest_rate_window
            ))
        })?;
        Ok(Agile {
            source,
            cfg: self.cfg,
            window,
        })
    }
}

impl Agile {
    /// Start building an orchestrator.
    #[must_use]
    pub fn builder() -> AgileBuilder {
        AgileBuilder::new()
    }

    /// The configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &AgileConfig {
        &self.cfg
    }

    /// The configured source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn RateSource> {
        &self.source
    }

    /// A fetcher over the configured source using the configured policy.
    #[must_use]
    pub fn fetcher(&self) -> RetryingFetcher {
        RetryingFetcher::new(Arc::clone(&self.source), RetryPolicy::new(self.cfg.retry))
    }

    /// Start an interactive session with its own store, cursors and flags.
    ///
    /// Sessions share nothing but the source. Call
    /// [`initial_load`](PaginationController::initial_load) to populate one.
    #[must_use]
    pub fn session(&self) -> Arc<PaginationController> {
        Arc::new(PaginationController::new(self.fetcher()))
    }

    /// Fetch the default page and resolve current, next and cheapest slots at `now`.
    ///
    /// Behavior and trade-offs:
    /// - Uses its own fetch and a throwaway store; no session is read or touched.
    /// - Never fails: errors are reported through [`WidgetRates::error`].
    pub async fn widget_rates(&self, now: DateTime<Utc>) -> WidgetRates {
        widget::refresh(&self.fetcher(), now, self.window).await
    }
}
