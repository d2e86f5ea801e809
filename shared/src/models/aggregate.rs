//! Aggregate records served by the log-analytics API.
//!
//! Each endpoint returns a JSON array of one of these records. Ordering is
//! whatever the server chose and is never re-sorted here.

use serde::{Deserialize, Serialize};

use super::timestamp::Timestamp;

/// Level label counted as an error.
pub const LEVEL_ERROR: &str = "ERROR";

/// Level label counted as a warning.
pub const LEVEL_WARN: &str = "WARN";

/// Log volume in one histogram bucket of `/api/logs/over-time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePoint {
    /// Start of the bucket.
    pub ts: Timestamp,
    /// Number of logs in the bucket.
    pub count: u64,
}

impl TimePoint {
    /// Creates a new time point.
    #[must_use]
    pub fn new(ts: Timestamp, count: u64) -> Self {
        Self { ts, count }
    }
}

/// Log volume for one severity label from `/api/logs/levels`.
///
/// The level is an open set (`ERROR`, `WARN`, `INFO`, `DEBUG`, ...), so it is
/// kept as the raw label the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCount {
    /// Severity label.
    pub level: String,
    /// Number of logs with this label.
    pub count: u64,
}

impl LevelCount {
    /// Creates a new level count.
    #[must_use]
    pub fn new(level: impl Into<String>, count: u64) -> Self {
        Self {
            level: level.into(),
            count,
        }
    }
}

/// Log volume for one host from `/api/logs/top-hosts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCount {
    /// Host identifier.
    pub host: String,
    /// Number of logs from this host.
    pub count: u64,
}

impl HostCount {
    /// Creates a new host count.
    #[must_use]
    pub fn new(host: impl Into<String>, count: u64) -> Self {
        Self {
            host: host.into(),
            count,
        }
    }
}

/// Sums the counts of a time series. An empty series totals zero.
///
/// # Example
///
/// ```
/// use shared::models::{total_count, TimePoint, Timestamp};
///
/// let points = vec![
///     TimePoint::new(Timestamp::Text("T1".into()), 5),
///     TimePoint::new(Timestamp::Text("T2".into()), 3),
/// ];
/// assert_eq!(total_count(&points), 8);
/// assert_eq!(total_count(&[]), 0);
/// ```
#[must_use]
pub fn total_count(points: &[TimePoint]) -> u64 {
    points
        .iter()
        .fold(0u64, |sum, point| sum.saturating_add(point.count))
}

/// Looks up the count for an exact level label, defaulting to zero.
///
/// The first matching record wins; the comparison is case-sensitive.
#[must_use]
pub fn level_count(levels: &[LevelCount], level: &str) -> u64 {
    levels
        .iter()
        .find(|record| record.level == level)
        .map_or(0, |record| record.count)
}
