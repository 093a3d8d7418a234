use std::sync::Arc;

use agile_core::{AgileError, FetchTarget, RateSource, RatesPage, RetryPolicy, should_retry};

/// Wraps one [`RateSource`] call with classification-aware retry.
///
/// Before attempt `n` the fetcher sleeps for [`RetryPolicy::delay_before`]`(n)`;
/// the sleep is a tokio timer, so dropping the future cancels the wait.
/// Fatal errors end the loop at once; retryable ones are attempted until the
/// budget runs out, after which the last error is returned.
#[derive(Clone)]
pub struct RetryingFetcher {
    source: Arc<dyn RateSource>,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    /// Create a fetcher over `source`.
    #[must_use]
    pub fn new(source: Arc<dyn RateSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// The wrapped source.
    #[must_use]
    pub fn source(&self) -> &Arc<dyn RateSource> {
        &self.source
    }

    /// The retry policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Fetch one page for `target`, retrying transient failures.
    ///
    /// # Errors
    /// Returns the first fatal error, or the last retryable one once every
    /// attempt has failed.
    pub async fn fetch(&self, target: &FetchTarget) -> Result<RatesPage, AgileError> {
        let max = self.policy.max_attempts();
        let mut attempt = 1;
        loop {
            let wait = self.policy.delay_before(attempt);
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                source = self.source.name(),
                request = %target,
                attempt,
                max,
                "fetching unit rates"
            );

            let err = match self.source.fetch_page(target).await {
                Ok(page) => return Ok(page),
                Err(e) => e,
            };

            if !should_retry(&err) {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    request = %target,
                    attempt,
                    error = %err,
                    "fetch failed, not retrying"
                );
                return Err(err);
            }
            if attempt >= max {
                #[cfg(feature = "tracing")]
                tracing::error!(
                    request = %target,
                    attempts = max,
                    error = %err,
                    "fetch failed, retries exhausted"
                );
                return Err(err);
            }

            #[cfg(feature = "tracing")]
            tracing::warn!(
                request = %target,
                error = %err,
                "fetch failed (attempt {}/{}), retrying",
                attempt,
                max
            );
            attempt += 1;
        }
    }
}
