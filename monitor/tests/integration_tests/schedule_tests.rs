//! Integration tests for the repeating refresh schedule.

use monitor::Endpoint;
use std::time::Duration;

use super::common::{eventually, Reply, StubApi};

#[tokio::test]
async fn test_start_refreshes_immediately() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard();

    let schedule = dashboard.start();
    assert_eq!(schedule.period(), Duration::from_secs(30));
    assert!(schedule.is_running());

    let connected = eventually(Duration::from_secs(5), || {
        dashboard
            .snapshot()
            .status()
            .is_some_and(|s| s.is_connected())
    })
    .await;
    assert!(connected);

    for endpoint in Endpoint::ALL {
        assert_eq!(api.hits(endpoint), 1);
    }

    schedule.stop();
}

#[tokio::test]
async fn test_schedule_keeps_refreshing() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard_every(Duration::from_millis(100));

    let schedule = dashboard.start();
    assert_eq!(schedule.period(), Duration::from_millis(100));

    let repeated = eventually(Duration::from_secs(5), || {
        Endpoint::ALL.iter().all(|&endpoint| api.hits(endpoint) >= 3)
    })
    .await;
    assert!(repeated);

    schedule.stop();
}

#[tokio::test]
async fn test_stop_ends_schedule() {
    let api = StubApi::spawn().await;
    api.healthy();
    let dashboard = api.dashboard_every(Duration::from_millis(50));

    let schedule = dashboard.start();
    assert!(eventually(Duration::from_secs(5), || api.hits(Endpoint::TopHosts) >= 2).await);
    schedule.stop();

    // Let any cycle spawned by the last tick finish before sampling.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let settled = api.hits(Endpoint::TopHosts);

    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(api.hits(Endpoint::TopHosts), settled);
}

#[tokio::test]
async fn test_slow_cycle_does_not_block_ticks() {
    let api = StubApi::spawn().await;
    api.healthy();
    api.reply(Endpoint::LogLevels, Reply::Hang);
    let dashboard = api.dashboard_every(Duration::from_millis(50));

    let schedule = dashboard.start();

    // Every cycle hangs on the level fetch, yet new cycles keep starting.
    let ticking = eventually(Duration::from_secs(5), || {
        api.hits(Endpoint::LogLevels) >= 3 && api.hits(Endpoint::TopHosts) >= 3
    })
    .await;
    assert!(ticking);
    assert!(dashboard.snapshot().status().is_none());
    assert!(dashboard.snapshot().refresh_control().is_disabled());

    schedule.stop();
}
