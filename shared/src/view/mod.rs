//! Dashboard view model.
//!
//! [`DashboardView`] is the single owned surface every refresh writes into:
//! the three charts, the summary fields, the status indicator, and the
//! refresh control. Elements are addressed by [`ElementId`], whose string
//! forms are the identifiers shared with the presentation layer.
//!
//! Each `apply_*` method commits one endpoint's data (its chart plus the
//! summary fields derived from it) and nothing else, so endpoints can land in
//! any order.

pub mod chart;
pub mod color;
pub mod control;
pub mod status;

pub use chart::{Chart, ChartConfig, ChartKind, Charts, DatasetStyle, Legend, YAxis, LEVEL_PALETTE};
pub use color::Rgb;
pub use control::{RefreshControl, LOADING_LABEL, REFRESH_LABEL};
pub use status::StatusIndicator;

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{
    level_count, total_count, HostCount, LevelCount, TimePoint, LEVEL_ERROR, LEVEL_WARN,
};

/// Text shown in a summary field that has not been filled yet.
pub const EMPTY_FIELD: &str = "-";

/// Format of the "last update" field.
const LAST_UPDATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Identifiers of the elements on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ElementId {
    /// Time-series chart canvas.
    TimeChart,
    /// Level distribution chart canvas.
    LevelChart,
    /// Host distribution chart canvas.
    HostChart,
    /// Manual refresh trigger.
    RefreshButton,
    /// Connectivity indicator.
    StatusIndicator,
    /// Connectivity text.
    StatusText,
    /// Total log count.
    TotalLogs,
    /// Error count.
    ErrorCount,
    /// Warning count.
    WarningCount,
    /// Active host count.
    HostCount,
    /// Time of the last completed refresh.
    LastUpdate,
}

impl ElementId {
    /// Every element, in layout order.
    pub const ALL: [Self; 11] = [
        Self::RefreshButton,
        Self::StatusIndicator,
        Self::StatusText,
        Self::TotalLogs,
        Self::ErrorCount,
        Self::WarningCount,
        Self::HostCount,
        Self::LastUpdate,
        Self::TimeChart,
        Self::LevelChart,
        Self::HostChart,
    ];

    /// The identifier shared with the presentation layer.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TimeChart => "timeChart",
            Self::LevelChart => "levelChart",
            Self::HostChart => "hostChart",
            Self::RefreshButton => "refresh-btn",
            Self::StatusIndicator => "status-indicator",
            Self::StatusText => "status-text",
            Self::TotalLogs => "total-logs",
            Self::ErrorCount => "error-count",
            Self::WarningCount => "warning-count",
            Self::HostCount => "host-count",
            Self::LastUpdate => "last-update",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ElementId> for &'static str {
    fn from(id: ElementId) -> Self {
        id.as_str()
    }
}

/// Error returned when parsing an unknown element identifier.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown element id: {0}")]
pub struct UnknownElementId(pub String);

impl FromStr for ElementId {
    type Err = UnknownElementId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownElementId(s.to_string()))
    }
}

/// Derived scalar fields shown above the charts.
///
/// `None` means the field has not been written since startup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Sum of all time-series counts.
    pub total_logs: Option<u64>,
    /// Count of the `ERROR` level.
    pub error_count: Option<u64>,
    /// Count of the `WARN` level.
    pub warning_count: Option<u64>,
    /// Number of hosts returned.
    pub host_count: Option<u64>,
    /// Local time the last refresh cycle settled.
    pub last_update: Option<DateTime<Local>>,
}

/// The dashboard's complete displayed state.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardView {
    charts: Charts,
    summary: Summary,
    status: Option<StatusIndicator>,
    refresh: RefreshControl,
}

impl DashboardView {
    /// Creates the view with empty charts and an enabled refresh control.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the charts.
    #[must_use]
    pub fn charts(&self) -> &Charts {
        &self.charts
    }

    /// Returns the summary fields.
    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Returns the status indicator, or `None` before the first refresh settles.
    #[must_use]
    pub fn status(&self) -> Option<StatusIndicator> {
        self.status
    }

    /// Returns the refresh control.
    #[must_use]
    pub fn refresh_control(&self) -> &RefreshControl {
        &self.refresh
    }

    /// Returns the refresh control for mutation.
    pub fn refresh_control_mut(&mut self) -> &mut RefreshControl {
        &mut self.refresh
    }

    /// Commits a time series: redraws the time chart and the total log count.
    pub fn apply_time_series(&mut self, points: &[TimePoint]) {
        let labels = points.iter().map(|point| point.ts.label()).collect();
        let counts = points.iter().map(|point| point.count).collect();
        self.charts.time.update(labels, counts);

        self.summary.total_logs = Some(total_count(points));
    }

    /// Commits a level distribution: redraws the level chart and the error
    /// and warning counts.
    pub fn apply_levels(&mut self, levels: &[LevelCount]) {
        let labels = levels.iter().map(|record| record.level.clone()).collect();
        let counts = levels.iter().map(|record| record.count).collect();
        self.charts.levels.update(labels, counts);

        self.summary.error_count = Some(level_count(levels, LEVEL_ERROR));
        self.summary.warning_count = Some(level_count(levels, LEVEL_WARN));
    }

    /// Commits a host distribution: redraws the host chart and the active
    /// host count.
    pub fn apply_hosts(&mut self, hosts: &[HostCount]) {
        let labels = hosts.iter().map(|record| record.host.clone()).collect();
        let counts = hosts.iter().map(|record| record.count).collect();
        self.charts.hosts.update(labels, counts);

        self.summary.host_count = Some(hosts.len() as u64);
    }

    /// Sets the status indicator from a refresh outcome.
    pub fn set_status(&mut self, connected: bool) {
        self.status = Some(StatusIndicator::from_connected(connected));
    }

    /// Records the time a refresh cycle settled.
    pub fn mark_updated(&mut self, at: DateTime<Local>) {
        self.summary.last_update = Some(at);
    }

    /// Returns the text content of a text element, or `None` for chart canvases.
    ///
    /// ```
    /// use shared::view::{DashboardView, ElementId};
    ///
    /// let view = DashboardView::new();
    /// assert_eq!(view.text(ElementId::TotalLogs).as_deref(), Some("-"));
    /// assert_eq!(view.text(ElementId::RefreshButton).as_deref(), Some("🔄 Refresh"));
    /// assert_eq!(view.text(ElementId::TimeChart), None);
    /// ```
    #[must_use]
    pub fn text(&self, id: ElementId) -> Option<String> {
        let summary = &self.summary;
        let text = match id {
            ElementId::TimeChart | ElementId::LevelChart | ElementId::HostChart => return None,
            ElementId::RefreshButton => self.refresh.label().to_string(),
            ElementId::StatusIndicator => match self.status {
                Some(status) if status.is_error() => "error".to_string(),
                _ => String::new(),
            },
            ElementId::StatusText => self
                .status
                .map_or_else(|| "Connecting...".to_string(), |s| s.text().to_string()),
            ElementId::TotalLogs => field(summary.total_logs, format_grouped),
            ElementId::ErrorCount => field(summary.error_count, |n| n.to_string()),
            ElementId::WarningCount => field(summary.warning_count, |n| n.to_string()),
            ElementId::HostCount => field(summary.host_count, |n| n.to_string()),
            ElementId::LastUpdate => field(summary.last_update, |at| {
                at.format(LAST_UPDATE_FORMAT).to_string()
            }),
        };
        Some(text)
    }
}

fn field<T>(value: Option<T>, format: impl FnOnce(T) -> String) -> String {
    value.map_or_else(|| EMPTY_FIELD.to_string(), format)
}

/// Formats a count with comma thousands separators.
///
/// ```
/// use shared::view::format_grouped;
///
/// assert_eq!(format_grouped(0), "0");
/// assert_eq!(format_grouped(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
