use agile_types::{AgileConfig, AgileError, RetryConfig, TransportKind};

#[test]
fn http_status_splits_server_and_client() {
    for status in [500, 502, 503, 599, 408, 429] {
        assert_eq!(AgileError::http_status(status), AgileError::Server { status });
    }
    for status in [400, 401, 403, 404, 410, 418] {
        assert_eq!(AgileError::http_status(status), AgileError::Client { status });
    }
}

#[test]
fn status_is_exposed_only_for_http_errors() {
    assert_eq!(AgileError::http_status(404).status(), Some(404));
    assert_eq!(AgileError::http_status(503).status(), Some(503));
    assert_eq!(AgileError::EmptyBody.status(), None);
    assert_eq!(
        AgileError::transport(TransportKind::Timeout, "read timed out").status(),
        None
    );
}

#[test]
fn api_error_message_carries_the_status() {
    assert_eq!(AgileError::http_status(404).to_string(), "API Error: 404");
    assert_eq!(
        AgileError::EmptyBody.to_string(),
        "Empty response body from server"
    );
}

#[test]
fn error_roundtrips_through_serde() {
    let err = AgileError::transport(TransportKind::ConnectionRefused, "refused");
    let json = serde_json::to_string(&err).expect("serialize error");
    let de: AgileError = serde_json::from_str(&json).expect("deserialize error");
    assert_eq!(de, err);
}

#[test]
fn config_defaults_match_documented_policy() {
    let retry = RetryConfig::default();
    assert_eq!(retry.max_attempts, 3);
    assert_eq!(retry.base_delay.as_secs(), 2);
    assert_eq!(retry.jitter_percent, 0);

    let cfg = AgileConfig::default();
    assert_eq!(cfg.lowest_rate_window.as_secs(), 24 * 60 * 60);

    let json = serde_json::to_string(&cfg).expect("serialize config");
    let de: AgileConfig = serde_json::from_str(&json).expect("deserialize config");
    assert_eq!(de.retry, retry);
}
