//! Data models for the Dataflow Monitor dashboard.
//!
//! This module contains the aggregate records returned by the log-analytics
//! API. They are request-scoped: decoded, applied to the view, then dropped.

pub mod aggregate;
pub mod timestamp;

pub use aggregate::{
    level_count, total_count, HostCount, LevelCount, TimePoint, LEVEL_ERROR, LEVEL_WARN,
};
pub use timestamp::{Timestamp, INVALID_DATE_LABEL};
