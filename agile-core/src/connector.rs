use async_trait::async_trait;

use crate::{AgileError, FetchTarget, RatesPage};

/// A remote source of paginated unit-rate slots.
///
/// Implementations perform exactly one request per call and never retry on
/// their own; retry policy lives with the caller. Errors must be tagged with
/// the [`AgileError`] variant that matches the failure so the caller can tell
/// transient from fatal conditions.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// A stable identifier used in logs (e.g. "agile-octopus").
    fn name(&self) -> &'static str;

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Fetch one page for the given target.
    async fn fetch_page(&self, target: &FetchTarget) -> Result<RatesPage, AgileError>;
}
