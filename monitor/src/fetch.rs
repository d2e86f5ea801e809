//! Data fetchers.
//!
//! One fetcher per endpoint. Each fetches its records, then takes the view
//! lock just long enough to commit its chart and summary fields. Any failure
//! is logged and reported as `false`; the view is left exactly as it was.
//! A view poisoned by a panicking writer is still written to.

use serde::de::DeserializeOwned;
use shared::models::{HostCount, LevelCount, TimePoint};
use shared::view::DashboardView;

use crate::client::{ApiClient, Endpoint};
use crate::error::FetchError;
use crate::refresh::write_view;
use crate::SharedView;

/// Refreshes the time chart and the total log count.
pub async fn update_logs_over_time(client: &ApiClient, view: &SharedView) -> bool {
    let result = fetch_and_apply::<TimePoint, _>(
        client,
        view,
        Endpoint::LogsOverTime,
        DashboardView::apply_time_series,
    )
    .await;
    settle(Endpoint::LogsOverTime, result)
}

/// Refreshes the level chart and the error and warning counts.
pub async fn update_log_levels(client: &ApiClient, view: &SharedView) -> bool {
    let result = fetch_and_apply::<LevelCount, _>(
        client,
        view,
        Endpoint::LogLevels,
        DashboardView::apply_levels,
    )
    .await;
    settle(Endpoint::LogLevels, result)
}

/// Refreshes the host chart and the active host count.
pub async fn update_top_hosts(client: &ApiClient, view: &SharedView) -> bool {
    let result = fetch_and_apply::<HostCount, _>(
        client,
        view,
        Endpoint::TopHosts,
        DashboardView::apply_hosts,
    )
    .await;
    settle(Endpoint::TopHosts, result)
}

async fn fetch_and_apply<T, F>(
    client: &ApiClient,
    view: &SharedView,
    endpoint: Endpoint,
    apply: F,
) -> Result<usize, FetchError>
where
    T: DeserializeOwned,
    F: FnOnce(&mut DashboardView, &[T]),
{
    let records: Vec<T> = client.get_records(endpoint).await?;

    apply(&mut *write_view(view), records.as_slice());

    Ok(records.len())
}

fn settle(endpoint: Endpoint, result: Result<usize, FetchError>) -> bool {
    match result {
        Ok(records) => {
            tracing::debug!(%endpoint, records, "Chart refreshed");
            true
        }
        Err(e) => {
            tracing::error!(error = %e, %endpoint, "Failed to refresh chart");
            false
        }
    }
}
