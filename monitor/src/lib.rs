//! Dataflow Monitor Refresh Engine
//!
//! This crate keeps a [`DashboardView`] in sync with a log-analytics API.
//! It fetches three aggregate endpoints, commits each result to its chart as
//! soon as it arrives, and folds the outcomes into a connectivity status.
//!
//! # Architecture
//!
//! - [`client`] - HTTP client and endpoint table
//! - [`fetch`] - One fetcher per endpoint, each reporting success as a `bool`
//! - [`refresh`] - Concurrent refresh cycle and the refresh-control guard
//! - [`schedule`] - Immediate refresh followed by a fixed-interval schedule
//!
//! # Example
//!
//! ```no_run
//! use monitor::{Config, Dashboard};
//!
//! #[tokio::main]
//! async fn main() {
//!     let dashboard = Dashboard::new(&Config::default());
//!     let schedule = dashboard.start();
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(5)).await;
//!     println!("{:?}", dashboard.snapshot().status());
//!
//!     schedule.stop();
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
mod config;
pub mod error;
pub mod fetch;
pub mod refresh;
pub mod schedule;

pub use client::{ApiClient, Endpoint};
pub use config::{Config, ConfigError, DEFAULT_API_BASE_URL, DEFAULT_REFRESH_INTERVAL_SECS};
pub use error::FetchError;
pub use schedule::RefreshSchedule;

use shared::view::DashboardView;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

use refresh::RefreshGuard;

/// The dashboard view shared between fetchers and the renderer.
pub type SharedView = Arc<RwLock<DashboardView>>;

/// A dashboard bound to one analytics API.
///
/// Cloning is cheap; clones share the view and the connection pool.
#[derive(Debug, Clone)]
pub struct Dashboard {
    client: ApiClient,
    view: SharedView,
    refresh_interval: Duration,
}

impl Dashboard {
    /// Creates a dashboard with empty charts.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: ApiClient::new(config.api_base_url.clone()),
            view: Arc::new(RwLock::new(DashboardView::new())),
            refresh_interval: config.refresh_interval(),
        }
    }

    /// Overrides the refresh cadence.
    #[must_use]
    pub fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    /// Returns the base URL of the analytics API.
    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Returns the refresh cadence.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the shared view.
    #[must_use]
    pub fn view(&self) -> &SharedView {
        &self.view
    }

    /// Returns a copy of the current view.
    #[must_use]
    pub fn snapshot(&self) -> DashboardView {
        self.view
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Runs one refresh cycle to completion and returns the overall connectivity.
    ///
    /// This is the scheduled path: it runs even while another cycle is in
    /// flight, and the last fetcher to finish for a chart wins.
    pub async fn refresh(&self) -> bool {
        let guard = RefreshGuard::engage(&self.view);
        refresh::run_cycle(self.client.clone(), self.view.clone(), guard).await
    }

    /// Starts a refresh cycle from the refresh control.
    ///
    /// Returns `None` if the control is disabled because a cycle is already
    /// in flight. Otherwise the cycle runs in the background and its handle
    /// resolves to the overall connectivity.
    #[must_use]
    pub fn trigger_refresh(&self) -> Option<JoinHandle<bool>> {
        let Some(guard) = RefreshGuard::try_engage(&self.view) else {
            tracing::debug!("Refresh already in progress, ignoring trigger");
            return None;
        };
        Some(tokio::spawn(refresh::run_cycle(
            self.client.clone(),
            self.view.clone(),
            guard,
        )))
    }

    /// Refreshes immediately, then keeps refreshing every
    /// [`refresh_interval`](Self::refresh_interval).
    pub fn start(&self) -> RefreshSchedule {
        tracing::info!(
            api = %self.client.base_url(),
            interval_secs = self.refresh_interval.as_secs(),
            "Dashboard refresh schedule starting"
        );
        RefreshSchedule::spawn(self.clone())
    }
}
