//! Connectivity indicator.

use serde::Serialize;

use super::color::Rgb;

/// Text color of a healthy connection.
pub const CONNECTED_COLOR: Rgb = Rgb::from_hex(0x10_b9_81);

/// Text color of a failed refresh.
pub const ERROR_COLOR: Rgb = Rgb::from_hex(0xef_44_44);

/// Binary connected/disconnected indicator.
///
/// There is no intermediate state: the indicator is a pure function of the
/// last refresh outcome.
///
/// ```
/// use shared::view::StatusIndicator;
///
/// assert_eq!(StatusIndicator::from_connected(true).text(), "Connected");
/// assert_eq!(StatusIndicator::from_connected(false).text(), "Connection Error");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    connected: bool,
}

impl StatusIndicator {
    /// Builds the indicator for a refresh outcome.
    #[must_use]
    pub const fn from_connected(connected: bool) -> Self {
        Self { connected }
    }

    /// Returns true if the last refresh fully succeeded.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Returns true if the indicator is in its error state.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        !self.connected
    }

    /// Status text.
    #[must_use]
    pub const fn text(&self) -> &'static str {
        if self.connected {
            "Connected"
        } else {
            "Connection Error"
        }
    }

    /// Status text color.
    #[must_use]
    pub const fn color(&self) -> Rgb {
        if self.connected {
            CONNECTED_COLOR
        } else {
            ERROR_COLOR
        }
    }
}
