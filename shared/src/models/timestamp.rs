//! Bucket timestamps as emitted by the time-series endpoint.
//!
//! The analytics API is not strict about the timestamp encoding: histogram
//! buckets may carry an ISO-8601 string or a number of epoch milliseconds.
//! A timestamp that cannot be interpreted still yields a chart label
//! ([`INVALID_DATE_LABEL`]) rather than failing the whole series.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label shown for a bucket whose timestamp cannot be parsed.
pub const INVALID_DATE_LABEL: &str = "Invalid Date";

/// Largest representable distance from the epoch, in milliseconds (±100,000,000 days).
const MAX_EPOCH_MILLIS: f64 = 8.64e15;

/// Format of the time-series axis labels: two-digit 12-hour clock with minutes.
const TIME_LABEL_FORMAT: &str = "%I:%M %p";

/// A bucket timestamp, either textual or numeric.
///
/// # Example
///
/// ```
/// use shared::models::Timestamp;
///
/// let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00.000Z\"").unwrap();
/// assert!(ts.to_datetime().is_some());
///
/// let ts: Timestamp = serde_json::from_str("1705314600000").unwrap();
/// assert_eq!(ts.to_datetime().unwrap().to_rfc3339(), "2024-01-15T10:30:00+00:00");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Milliseconds since the Unix epoch.
    Epoch(f64),
    /// An ISO-8601 / RFC 3339 date or date-time string.
    Text(String),
}

impl Timestamp {
    /// Interprets the timestamp as an instant.
    ///
    /// Strings carrying an offset are parsed as RFC 3339. A date-time without
    /// an offset is taken as local time, and a bare date as UTC midnight.
    /// Returns `None` if the value cannot be interpreted.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Epoch(millis) => from_epoch_millis(*millis),
            Self::Text(text) => parse_text(text.trim()),
        }
    }

    /// Formats the timestamp as an axis label in the local time zone.
    #[must_use]
    pub fn label(&self) -> String {
        self.label_in(&Local)
    }

    /// Formats the timestamp as an axis label in the given time zone.
    ///
    /// ```
    /// use chrono::Utc;
    /// use shared::models::Timestamp;
    ///
    /// let ts = Timestamp::Text("2024-01-15T14:05:00Z".to_string());
    /// assert_eq!(ts.label_in(&Utc), "02:05 PM");
    /// ```
    #[must_use]
    pub fn label_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.to_datetime().map_or_else(
            || INVALID_DATE_LABEL.to_string(),
            |dt| dt.with_timezone(tz).format(TIME_LABEL_FORMAT).to_string(),
        )
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epoch(millis) => write!(f, "{millis}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() || millis.abs() > MAX_EPOCH_MILLIS {
        return None;
    }
    DateTime::from_timestamp_millis(millis.trunc() as i64)
}

fn parse_text(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
