//! Agile tracks Octopus Agile half-hourly unit rates across paginated fetches.
//!
//! Overview
//! - A [`RateSource`] returns one page per call; [`RetryingFetcher`] wraps it with
//!   linear backoff, retrying transport failures and 5xx/408/429 only.
//! - A [`PaginationController`] session merges pages into an ordered,
//!   deduplicating store and walks older and newer continuations independently.
//! - Consumers watch a three-state [`RatesState`] and query snapshots with the
//!   pure functions in [`resolve`].
//! - [`Agile::widget_rates`] is a one-shot path for glanceable displays that
//!   never touches a session.
//!
//! Key behaviors and trade-offs
//! - A populated session never regresses to `Error`: later failures are logged
//!   and the last `Success` stays published.
//! - Cursors only move on success, so a failed direction can simply be retried.
//! - A stuck request holds its direction's in-flight flag until it resolves or
//!   the calling future is dropped; the HTTP client's timeout bounds it in practice.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use agile::{Agile, RatesState};
//! use agile_octopus::OctopusSource;
//!
//! let agile = Agile::builder()
//!     .with_source(Arc::new(OctopusSource::new_default()?))
//!     .build()?;
//!
//! let session = agile.session();
//! let mut rx = session.subscribe();
//! session.initial_load().await;
//! if let RatesState::Success(rates) = &*rx.borrow_and_update() {
//!     let now = chrono::Utc::now();
//!     println!("now: {:?}", agile::resolve::current(rates, now));
//! }
//! session.load_older().await;
//! ```
//!
//! See `agile/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod fetcher;
mod pagination;
mod widget;

pub use core::{Agile, AgileBuilder};
pub use fetcher::RetryingFetcher;
pub use pagination::{LoadOutcome, NO_RATES_MESSAGE, PaginationController, RatesState, SkipReason};
pub use widget::{NO_DATA_MESSAGE, WidgetRates};

// Re-export core types for convenience
pub use agile_core::{
    AgileConfig, AgileError, FetchTarget, PageToken, RateKey, RateSource, RateStore, RatesPage,
    RetryConfig, RetryPolicy, TransportKind, UnitRate, display, resolve, should_retry,
};
