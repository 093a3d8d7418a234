mod helpers;

use std::time::Duration;

use agile::{AgileError, FetchTarget, RetryConfig, RetryPolicy, RetryingFetcher};
use agile_mock::MockSource;
use helpers::*;

fn mock_fetcher(policy: RetryPolicy) -> (RetryingFetcher, agile_mock::MockController) {
    let (source, ctl) = MockSource::new_with_controller("mock");
    (RetryingFetcher::new(source, policy), ctl)
}

// The paused clock advances to timer ticks, which are rounded up to the millisecond.
fn assert_near(got: Duration, want: Duration) {
    assert!(
        got >= want && got < want + Duration::from_millis(5),
        "expected ~{want:?}, got {got:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn two_timeouts_then_success_waits_two_then_four_seconds() {
    let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
    let page = page_at(dt(2024, 11, 3, 0, 0), &[10, 12], Some("older-1"), None);
    ctl.script(
        FetchTarget::Default,
        vec![
            MockBehavior::Fail(timeout()),
            MockBehavior::Fail(timeout()),
            MockBehavior::Return(page.clone()),
        ],
    )
    .await;

    let got = fetcher.fetch(&FetchTarget::Default).await;
    assert_eq!(got, Ok(page));

    let times = ctl.call_times(&FetchTarget::Default).await;
    assert_eq!(times.len(), 3, "exactly three attempts");
    assert_near(times[1] - times[0], Duration::from_secs(2));
    assert_near(times[2] - times[1], Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn client_error_is_not_retried() {
    let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
    on(
        &ctl,
        FetchTarget::Default,
        MockBehavior::Fail(AgileError::http_status(404)),
    )
    .await;

    let err = fetcher.fetch(&FetchTarget::Default).await.unwrap_err();
    assert_eq!(err, AgileError::Client { status: 404 });
    assert_eq!(ctl.call_count().await, 1);
}

#[tokio::test(start_paused = true)]
async fn empty_body_and_unexpected_abort_the_loop() {
    for fatal in [AgileError::EmptyBody, AgileError::unexpected("boom")] {
        let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
        ctl.script(
            FetchTarget::Default,
            vec![
                MockBehavior::Fail(fatal.clone()),
                MockBehavior::Return(page_at(dt(2024, 11, 3, 0, 0), &[10], None, None)),
            ],
        )
        .await;

        let err = fetcher.fetch(&FetchTarget::Default).await.unwrap_err();
        assert_eq!(err, fatal);
        assert_eq!(ctl.call_count().await, 1);
    }
}

#[tokio::test(start_paused = true)]
async fn exhaustion_returns_the_last_error() {
    let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
    ctl.script(
        FetchTarget::Default,
        vec![
            MockBehavior::Fail(timeout()),
            MockBehavior::Fail(AgileError::http_status(502)),
            MockBehavior::Fail(AgileError::http_status(503)),
        ],
    )
    .await;

    let started = tokio::time::Instant::now();
    let err = fetcher.fetch(&FetchTarget::Default).await.unwrap_err();
    assert_eq!(err, AgileError::Server { status: 503 });
    assert_eq!(ctl.call_count().await, 3);
    assert_near(started.elapsed(), Duration::from_secs(6));
}

#[tokio::test(start_paused = true)]
async fn server_error_then_client_error_stops_early() {
    let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
    ctl.script(
        FetchTarget::Default,
        vec![
            MockBehavior::Fail(AgileError::http_status(429)),
            MockBehavior::Fail(AgileError::http_status(403)),
            MockBehavior::Return(page_at(dt(2024, 11, 3, 0, 0), &[10], None, None)),
        ],
    )
    .await;

    let err = fetcher.fetch(&FetchTarget::Default).await.unwrap_err();
    assert_eq!(err, AgileError::Client { status: 403 });
    assert_eq!(ctl.call_count().await, 2);
}

#[tokio::test(start_paused = true)]
async fn custom_budget_and_base_delay_are_honoured() {
    let policy = RetryPolicy::new(RetryConfig {
        max_attempts: 4,
        base_delay: Duration::from_millis(500),
        jitter_percent: 0,
    });
    let (fetcher, ctl) = mock_fetcher(policy);
    on(&ctl, cont("p2"), MockBehavior::Fail(timeout())).await;

    let err = fetcher.fetch(&cont("p2")).await.unwrap_err();
    assert_eq!(err, timeout());

    let times = ctl.call_times(&cont("p2")).await;
    assert_eq!(times.len(), 4);
    assert_near(times[1] - times[0], Duration::from_millis(500));
    assert_near(times[2] - times[1], Duration::from_millis(1000));
    assert_near(times[3] - times[2], Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn dropping_the_fetch_cancels_the_backoff() {
    let (fetcher, ctl) = mock_fetcher(RetryPolicy::default());
    on(&ctl, FetchTarget::Default, MockBehavior::Fail(timeout())).await;

    let res =
        tokio::time::timeout(Duration::from_secs(1), fetcher.fetch(&FetchTarget::Default)).await;
    assert!(res.is_err(), "still backing off after 1s");
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(ctl.call_count().await, 1);
}
