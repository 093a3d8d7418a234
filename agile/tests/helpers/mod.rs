// Re-export helpers so tests can `use helpers::*;`
#![allow(dead_code)]

use agile::{Agile, AgileError, FetchTarget, PageToken, RatesPage, TransportKind, UnitRate};
use agile_mock::{MockController, MockSource, fixtures};

pub use agile_mock::MockBehavior;

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date.and_hms_opt(hh, mm, 0).expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Orchestrator over a fresh mock source with the default policy.
pub fn agile_with_mock() -> (Agile, MockController) {
    let (source, ctl) = MockSource::new_with_controller("mock");
    let agile = Agile::builder()
        .with_source(source)
        .build()
        .expect("mock source configured");
    (agile, ctl)
}

/// Continuation target for a token string.
pub fn cont(token: &str) -> FetchTarget {
    FetchTarget::Continuation(PageToken::new(token))
}

/// Page of half-hour slots starting at `start` with whole-pence prices.
pub fn page_at(
    start: chrono::DateTime<chrono::Utc>,
    pence: &[i64],
    older: Option<&str>,
    newer: Option<&str>,
) -> RatesPage {
    fixtures::page(fixtures::slots_from_pence(start, pence), older, newer)
}

/// A transport timeout as a connector would report it.
pub fn timeout() -> AgileError {
    AgileError::transport(TransportKind::Timeout, "operation timed out")
}

/// Whether `rates` is strictly ascending by key.
pub fn is_ascending(rates: &[UnitRate]) -> bool {
    rates.windows(2).all(|w| w[0].key() < w[1].key())
}

/// Script a single behavior for a target.
pub async fn on(ctl: &MockController, target: FetchTarget, behavior: MockBehavior) {
    ctl.script(target, vec![behavior]).await;
}

