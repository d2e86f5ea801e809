//! Integration tests for the individual data fetchers.
//!
//! Tests cover:
//! - Chart element counts matching the records returned
//! - Derived summary fields, including their zero defaults
//! - Each failure mode leaving the view untouched

use axum::http::StatusCode;
use monitor::fetch::{update_log_levels, update_logs_over_time, update_top_hosts};
use monitor::{ApiClient, Endpoint};
use serde_json::json;

use super::common::{Reply, StubApi};

#[tokio::test]
async fn test_time_series_updates_chart_and_total() {
    let api = StubApi::spawn().await;
    api.reply(
        Endpoint::LogsOverTime,
        Reply::Json(json!([
            {"ts": "2024-01-15T10:30:00.000Z", "count": 5},
            {"ts": 1705314660000_i64, "count": 3},
            {"ts": "not a date", "count": 1200}
        ])),
    );
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(update_logs_over_time(&client, dashboard.view()).await);

    let view = dashboard.snapshot();
    let chart = &view.charts().time;
    assert_eq!(chart.len(), 3);
    assert_eq!(chart.data(), [5, 3, 1200]);
    assert_eq!(chart.labels()[2], "Invalid Date");
    assert_eq!(view.summary().total_logs, Some(1208));
    assert_eq!(
        view.text(shared::view::ElementId::TotalLogs).as_deref(),
        Some("1,208")
    );
    assert_eq!(api.hits(Endpoint::LogsOverTime), 1);
}

#[tokio::test]
async fn test_empty_time_series_totals_zero() {
    let api = StubApi::spawn().await;
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(update_logs_over_time(&client, dashboard.view()).await);

    let view = dashboard.snapshot();
    assert!(view.charts().time.is_empty());
    assert_eq!(view.summary().total_logs, Some(0));
}

#[tokio::test]
async fn test_levels_lookup_and_defaults() {
    let api = StubApi::spawn().await;
    api.reply(
        Endpoint::LogLevels,
        Reply::Json(json!([
            {"level": "INFO", "count": 6},
            {"level": "WARN", "count": 0},
            {"level": "DEBUG", "count": 1},
            {"level": "TRACE", "count": 1},
            {"level": "FATAL", "count": 1},
            {"level": "CUSTOM", "count": 1}
        ])),
    );
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(update_log_levels(&client, dashboard.view()).await);

    let view = dashboard.snapshot();
    assert_eq!(view.charts().levels.len(), 6);
    assert_eq!(view.summary().error_count, Some(0));
    assert_eq!(view.summary().warning_count, Some(0));
    assert_eq!(
        view.charts().levels.background_at(5),
        view.charts().levels.background_at(0)
    );
}

#[tokio::test]
async fn test_hosts_count_records() {
    let api = StubApi::spawn().await;
    api.reply(
        Endpoint::TopHosts,
        Reply::Json(json!([
            {"host": "web-1", "count": 10},
            {"host": "web-2", "count": 7},
            {"host": "db-1", "count": 2}
        ])),
    );
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(update_top_hosts(&client, dashboard.view()).await);

    let view = dashboard.snapshot();
    assert_eq!(view.charts().hosts.labels(), ["web-1", "web-2", "db-1"]);
    assert_eq!(view.summary().host_count, Some(3));
}

#[tokio::test]
async fn test_non_success_status_fails_without_touching_view() {
    let api = StubApi::spawn().await;
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    api.reply(Endpoint::TopHosts, Reply::Json(json!([{"host": "a", "count": 1}])));
    assert!(update_top_hosts(&client, dashboard.view()).await);

    for status in [
        StatusCode::INTERNAL_SERVER_ERROR,
        StatusCode::NOT_FOUND,
        StatusCode::SERVICE_UNAVAILABLE,
    ] {
        api.reply(Endpoint::TopHosts, Reply::Status(status));
        assert!(!update_top_hosts(&client, dashboard.view()).await);
    }

    let view = dashboard.snapshot();
    assert_eq!(view.charts().hosts.labels(), ["a"]);
    assert_eq!(view.charts().hosts.revision(), 1);
    assert_eq!(view.summary().host_count, Some(1));
}

#[tokio::test]
async fn test_malformed_json_fails() {
    let api = StubApi::spawn().await;
    api.reply(Endpoint::LogLevels, Reply::Raw("[{\"level\": \"ERROR\","));
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(!update_log_levels(&client, dashboard.view()).await);
    assert_eq!(dashboard.snapshot().charts().levels.revision(), 0);
    assert!(dashboard.snapshot().summary().error_count.is_none());
}

#[tokio::test]
async fn test_wrong_shape_fails() {
    let api = StubApi::spawn().await;
    api.reply(
        Endpoint::LogsOverTime,
        Reply::Json(json!({"buckets": [{"ts": "T1", "count": 1}]})),
    );
    api.reply(
        Endpoint::TopHosts,
        Reply::Json(json!([{"host": "a", "count": -4}])),
    );
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    assert!(!update_logs_over_time(&client, dashboard.view()).await);
    assert!(!update_top_hosts(&client, dashboard.view()).await);

    let view = dashboard.snapshot();
    assert!(view.summary().total_logs.is_none());
    assert!(view.summary().host_count.is_none());
}

#[tokio::test]
async fn test_fetch_commits_after_view_poisoned() {
    let api = StubApi::spawn().await;
    api.reply(Endpoint::TopHosts, Reply::Json(json!([{"host": "a", "count": 1}])));
    let dashboard = api.dashboard();
    let client = ApiClient::new(api.base_url());

    let view = dashboard.view().clone();
    let _ = std::thread::spawn(move || {
        let _lock = view.write().unwrap();
        panic!("writer panicked");
    })
    .join();
    assert!(dashboard.view().is_poisoned());

    assert!(update_top_hosts(&client, dashboard.view()).await);
    assert!(dashboard.refresh().await);

    let view = dashboard.snapshot();
    assert_eq!(view.summary().host_count, Some(1));
    assert_eq!(view.status().map(|s| s.is_connected()), Some(true));
}
