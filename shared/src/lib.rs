//! Dataflow Monitor Shared Library
//!
//! This crate contains the types shared between the refresh engine and the
//! terminal front end of the Dataflow Monitor dashboard.
//!
//! # Modules
//!
//! - [`models`] - Aggregate records returned by the log-analytics API
//! - [`view`] - Chart adapter, status indicator, and the dashboard view model
//!
//! # Example
//!
//! ```
//! use shared::models::{LevelCount, TimePoint, Timestamp};
//! use shared::view::{DashboardView, ElementId};
//!
//! let mut view = DashboardView::new();
//! view.apply_time_series(&[
//!     TimePoint::new(Timestamp::Epoch(0.0), 5),
//!     TimePoint::new(Timestamp::Epoch(60_000.0), 3),
//! ]);
//! view.apply_levels(&[LevelCount::new("ERROR", 2)]);
//!
//! assert_eq!(view.text(ElementId::TotalLogs).as_deref(), Some("8"));
//! assert_eq!(view.text(ElementId::ErrorCount).as_deref(), Some("2"));
//! assert_eq!(view.text(ElementId::WarningCount).as_deref(), Some("0"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod view;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
