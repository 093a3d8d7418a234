use std::sync::Arc;

use agile::{AgileError, RateSource};
use agile_mock::{MockBehavior, MockController, MockSource, fixtures};
use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// The source to run against, plus the mock controller when one is in use.
///
/// Keep the controller alive for as long as the source is used.
pub async fn get_source() -> Result<(Arc<dyn RateSource>, Option<MockController>), AgileError> {
    if std::env::var("AGILE_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Source for CI) ---");
        let (source, ctl) = MockSource::new_with_controller("mock");
        script_mock(&ctl, Utc::now()).await;
        Ok((source, Some(ctl)))
    } else {
        // Reads AGILE_BASE_URL / AGILE_PRODUCT_CODE / AGILE_TARIFF_CODE overrides.
        let source = agile_octopus::OctopusSource::from_env()?;
        Ok((Arc::new(source), None))
    }
}

/// Three days of Agile-shaped slots around `now`, paged newest-first.
async fn script_mock(ctl: &MockController, now: DateTime<Utc>) {
    let today = now
        .duration_trunc(TimeDelta::days(1))
        .unwrap_or(now);
    let day = |offset: i64| fixtures::agile_day(today + TimeDelta::days(offset));

    ctl.push(
        agile::FetchTarget::Default,
        MockBehavior::Return(fixtures::page(day(0), Some("older-1"), None)),
    )
    .await;
    ctl.push(
        agile::FetchTarget::Continuation(agile::PageToken::new("older-1")),
        MockBehavior::Return(fixtures::page(day(-1), Some("older-2"), None)),
    )
    .await;
    ctl.push(
        agile::FetchTarget::Continuation(agile::PageToken::new("older-2")),
        MockBehavior::Return(fixtures::page(day(-2), None, None)),
    )
    .await;
}
