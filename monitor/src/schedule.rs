//! Repeating refresh schedule.

use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::Dashboard;

/// Handle to the repeating refresh schedule started by [`Dashboard::start`].
///
/// Dropping the handle leaves the schedule running for the rest of the
/// process. [`RefreshSchedule::stop`] ends it; cycles already in flight are
/// not cancelled.
#[derive(Debug)]
pub struct RefreshSchedule {
    task: JoinHandle<()>,
    period: Duration,
}

impl RefreshSchedule {
    /// Runs one refresh immediately, then one every refresh interval.
    ///
    /// Each tick, including the first, spawns its cycle as a separate task,
    /// so a slow cycle never delays the next tick.
    pub(crate) fn spawn(dashboard: Dashboard) -> Self {
        // `interval` rejects a zero period.
        let period = dashboard.refresh_interval().max(Duration::from_millis(1));

        let task = tokio::spawn(async move {
            // The first tick completes immediately.
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                let cycle = dashboard.clone();
                tokio::spawn(async move {
                    cycle.refresh().await;
                });
            }
        });

        Self { task, period }
    }

    /// Time between scheduled cycles.
    #[must_use]
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Returns true until the schedule is stopped.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stops scheduling new cycles.
    pub fn stop(self) {
        self.task.abort();
        tracing::info!("Refresh schedule stopped");
    }
}
