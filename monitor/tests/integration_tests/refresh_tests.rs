//! Integration tests for full refresh cycles.
//!
//! Tests cover:
//! - The healthy three-endpoint scenario
//! - A single failing endpoint forcing the disconnected status
//! - The refresh control while a cycle is in flight
//! - Overlapping manual and scheduled cycles

use axum::http::StatusCode;
use chrono::Local;
use monitor::Endpoint;
use serde_json::json;
use shared::view::{ElementId, LOADING_LABEL, REFRESH_LABEL};
use std::time::Duration;

use super::common::{eventually, Reply, StubApi};

#[tokio::test]
async fn test_healthy_cycle_reports_connected() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard();

    let before = Local::now();
    assert!(dashboard.refresh().await);
    let after = Local::now();

    let view = dashboard.snapshot();
    assert_eq!(view.summary().total_logs, Some(8));
    assert_eq!(view.summary().error_count, Some(2));
    assert_eq!(view.summary().warning_count, Some(0));
    assert_eq!(view.summary().host_count, Some(2));
    assert_eq!(view.text(ElementId::StatusText).as_deref(), Some("Connected"));

    assert_eq!(view.charts().time.len(), 2);
    assert_eq!(view.charts().levels.len(), 2);
    assert_eq!(view.charts().hosts.len(), 2);

    let updated = view.summary().last_update.unwrap();
    assert!(updated >= before && updated <= after);
}

#[tokio::test]
async fn test_one_failing_endpoint_reports_disconnected() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard();
    assert!(dashboard.refresh().await);

    api.reply(
        Endpoint::LogsOverTime,
        Reply::Json(json!([{"ts": "2024-01-15T11:00:00Z", "count": 40}])),
    );
    api.reply(
        Endpoint::TopHosts,
        Reply::Json(json!([{"host": "c", "count": 40}])),
    );
    api.reply(
        Endpoint::LogLevels,
        Reply::Status(StatusCode::INTERNAL_SERVER_ERROR),
    );

    assert!(!dashboard.refresh().await);

    let view = dashboard.snapshot();
    assert_eq!(
        view.text(ElementId::StatusText).as_deref(),
        Some("Connection Error")
    );

    // Level chart keeps the previous cycle's data.
    assert_eq!(view.charts().levels.labels(), ["ERROR", "INFO"]);
    assert_eq!(view.charts().levels.revision(), 1);
    assert_eq!(view.summary().error_count, Some(2));

    // The other two charts moved on.
    assert_eq!(view.charts().time.data(), [40]);
    assert_eq!(view.summary().total_logs, Some(40));
    assert_eq!(view.charts().hosts.labels(), ["c"]);
    assert_eq!(view.summary().host_count, Some(1));

    assert!(view.summary().last_update.is_some());
    assert!(!view.refresh_control().is_disabled());
}

#[tokio::test]
async fn test_every_endpoint_failing() {
    let api = StubApi::spawn().await;
    for endpoint in Endpoint::ALL {
        api.reply(endpoint, Reply::Status(StatusCode::BAD_GATEWAY));
    }
    let dashboard = api.dashboard();

    assert!(!dashboard.refresh().await);

    let view = dashboard.snapshot();
    assert_eq!(view.status().map(|s| s.is_error()), Some(true));
    assert_eq!(view.text(ElementId::TotalLogs).as_deref(), Some("-"));
}

#[tokio::test]
async fn test_recovers_after_failure() {
    let api = StubApi::spawn().await;
    api.healthy();
    api.reply(Endpoint::TopHosts, Reply::Status(StatusCode::SERVICE_UNAVAILABLE));
    let dashboard = api.dashboard();

    assert!(!dashboard.refresh().await);
    api.healthy();
    assert!(dashboard.refresh().await);

    let view = dashboard.snapshot();
    assert_eq!(view.status().map(|s| s.is_connected()), Some(true));
    assert_eq!(view.summary().host_count, Some(2));
}

#[tokio::test]
async fn test_refresh_control_while_in_flight() {
    let api = StubApi::spawn().await;
    api.healthy();
    api.reply(Endpoint::LogLevels, Reply::Hang);
    let dashboard = api.dashboard();

    let handle = dashboard.trigger_refresh().expect("control starts enabled");

    let view = dashboard.snapshot();
    assert!(view.refresh_control().is_disabled());
    assert_eq!(view.refresh_control().label(), LOADING_LABEL);

    // A second press while disabled is ignored.
    assert!(dashboard.trigger_refresh().is_none());

    // The two responsive fetchers commit while the third hangs.
    let committed = eventually(Duration::from_secs(5), || {
        let view = dashboard.snapshot();
        view.summary().total_logs.is_some() && view.summary().host_count.is_some()
    })
    .await;
    assert!(committed);

    let view = dashboard.snapshot();
    assert!(view.refresh_control().is_disabled());
    assert!(view.status().is_none());
    assert!(view.summary().error_count.is_none());

    handle.abort();
    let _ = handle.await;

    let view = dashboard.snapshot();
    assert!(!view.refresh_control().is_disabled());
    assert_eq!(view.refresh_control().label(), REFRESH_LABEL);
}

#[tokio::test]
async fn test_manual_trigger_completes() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard();

    let handle = dashboard.trigger_refresh().unwrap();
    assert!(handle.await.unwrap());

    let view = dashboard.snapshot();
    assert_eq!(view.status().map(|s| s.is_connected()), Some(true));
    assert!(!view.refresh_control().is_disabled());
    assert!(dashboard.trigger_refresh().is_some());
}

#[tokio::test]
async fn test_scheduled_cycle_overlaps_manual_cycle() {
    let api = StubApi::spawn().await;
    api.healthy();
    api.reply(Endpoint::TopHosts, Reply::Hang);
    let dashboard = api.dashboard();

    let manual = dashboard.trigger_refresh().unwrap();
    assert!(dashboard.trigger_refresh().is_none());
    assert!(eventually(Duration::from_secs(5), || api.hits(Endpoint::TopHosts) == 1).await);

    // The scheduled path ignores the disabled control and runs anyway.
    api.reply(
        Endpoint::TopHosts,
        Reply::Json(json!([{"host": "z", "count": 1}])),
    );
    assert!(dashboard.refresh().await);

    // The first cycle to finish re-enables the control, even though the
    // manual cycle is still waiting on its host fetch.
    let view = dashboard.snapshot();
    assert_eq!(view.charts().hosts.labels(), ["z"]);
    assert_eq!(view.status().map(|s| s.is_connected()), Some(true));
    assert!(!view.refresh_control().is_disabled());
    assert!(!manual.is_finished());
    assert_eq!(api.hits(Endpoint::TopHosts), 2);

    manual.abort();
    let _ = manual.await;
}
