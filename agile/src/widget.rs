use agile_core::{AgileError, FetchTarget, RateStore, UnitRate, resolve};
use chrono::{DateTime, TimeDelta, Utc};

use crate::RetryingFetcher;

/// Message used when the response is empty or holds no usable slots.
pub const NO_DATA_MESSAGE: &str = "No data available.";

/// What a glanceable display needs: the slot now, the one after, and the
/// cheapest one coming up.
///
/// When `error` is set the three slots are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WidgetRates {
    /// Slot covering the reference instant.
    pub current: Option<UnitRate>,
    /// Slot following `current`.
    pub next: Option<UnitRate>,
    /// Cheapest slot intersecting the look-ahead window.
    pub lowest_next_24h: Option<UnitRate>,
    /// Short user-facing failure text.
    pub error: Option<String>,
}

impl WidgetRates {
    /// Resolve the three slots against an ascending slice.
    #[must_use]
    pub fn resolve(rates: &[UnitRate], now: DateTime<Utc>, window: TimeDelta) -> Self {
        Self {
            current: resolve::current(rates, now).cloned(),
            next: resolve::next(rates, now).cloned(),
            lowest_next_24h: resolve::lowest_in_window(rates, now, window).cloned(),
            error: None,
        }
    }

    /// A result carrying only an error message.
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            error: Some(msg.into()),
            ..Self::default()
        }
    }

    /// Whether resolution failed.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

fn error_text(err: &AgileError) -> String {
    match err.status() {
        Some(status) => format!("API Error: {status}"),
        None => format!("Error: {err}"),
    }
}

/// One-shot refresh independent of any interactive session.
pub(crate) async fn refresh(
    fetcher: &RetryingFetcher,
    now: DateTime<Utc>,
    window: TimeDelta,
) -> WidgetRates {
    let page = match fetcher.fetch(&FetchTarget::Default).await {
        Ok(page) => page,
        Err(AgileError::EmptyBody) => {
            #[cfg(feature = "tracing")]
            tracing::warn!("widget refresh got an empty body");
            return WidgetRates::failed(NO_DATA_MESSAGE);
        }
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %err, "widget refresh failed");
            return WidgetRates::failed(error_text(&err));
        }
    };

    let store: RateStore = page.records.into_iter().collect();
    if store.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::warn!("widget refresh returned no rates");
        return WidgetRates::failed(NO_DATA_MESSAGE);
    }
    WidgetRates::resolve(&store.snapshot(), now, window)
}
