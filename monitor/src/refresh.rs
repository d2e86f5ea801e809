//! Refresh orchestration.
//!
//! A refresh cycle runs the three fetchers as independent tasks, waits for
//! all of them, and folds their outcomes into the status indicator. The
//! refresh control stays disabled for the life of a [`RefreshGuard`], which is
//! released when the cycle ends, however it ends.

use chrono::Local;
use shared::view::DashboardView;
use std::sync::{PoisonError, RwLockWriteGuard};

use crate::client::ApiClient;
use crate::fetch;
use crate::SharedView;

/// Keeps the refresh control in its loading state until dropped.
#[derive(Debug)]
pub struct RefreshGuard {
    view: SharedView,
}

impl RefreshGuard {
    /// Puts the refresh control into its loading state, whatever its current state.
    ///
    /// Used by the scheduled path, which does not consult the control.
    #[must_use]
    pub fn engage(view: &SharedView) -> Self {
        write_view(view).refresh_control_mut().begin_loading();
        Self { view: view.clone() }
    }

    /// Puts the refresh control into its loading state unless it already is.
    ///
    /// Returns `None` while another guarded cycle holds the control, which is
    /// how a disabled control swallows manual triggers.
    #[must_use]
    pub fn try_engage(view: &SharedView) -> Option<Self> {
        {
            let mut guard = write_view(view);
            let control = guard.refresh_control_mut();
            if control.is_disabled() {
                return None;
            }
            control.begin_loading();
        }
        Some(Self { view: view.clone() })
    }
}

impl Drop for RefreshGuard {
    fn drop(&mut self) {
        write_view(&self.view).refresh_control_mut().restore();
    }
}

/// Runs one refresh cycle and returns the overall connectivity.
///
/// The three fetchers commit independently as they finish. Once all of them
/// have settled, the status indicator becomes the AND of their outcomes and
/// the last-update field is stamped. If a fetcher task itself fails (panics or
/// is aborted), the status is forced to disconnected.
pub async fn run_cycle(client: ApiClient, view: SharedView, _guard: RefreshGuard) -> bool {
    tracing::debug!(base_url = %client.base_url(), "Refresh cycle started");

    let time = tokio::spawn({
        let (client, view) = (client.clone(), view.clone());
        async move { fetch::update_logs_over_time(&client, &view).await }
    });
    let levels = tokio::spawn({
        let (client, view) = (client.clone(), view.clone());
        async move { fetch::update_log_levels(&client, &view).await }
    });
    let hosts = tokio::spawn({
        let (client, view) = (client.clone(), view.clone());
        async move { fetch::update_top_hosts(&client, &view).await }
    });

    let connected = match tokio::join!(time, levels, hosts) {
        (Ok(time), Ok(levels), Ok(hosts)) => {
            let connected = time && levels && hosts;
            let mut view = write_view(&view);
            view.set_status(connected);
            view.mark_updated(Local::now());
            connected
        }
        (time, levels, hosts) => {
            for e in [time.err(), levels.err(), hosts.err()].into_iter().flatten() {
                tracing::error!(error = %e, "Refresh task failed");
            }
            write_view(&view).set_status(false);
            false
        }
    };

    if connected {
        tracing::debug!("Refresh cycle completed");
    } else {
        tracing::warn!("Refresh cycle completed with errors");
    }

    connected
}

/// Locks the view for writing, recovering from poisoning.
///
/// Commits must land even after a writer panicked.
pub(crate) fn write_view(view: &SharedView) -> RwLockWriteGuard<'_, DashboardView> {
    view.write().unwrap_or_else(PoisonError::into_inner)
}
