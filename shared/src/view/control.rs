//! Refresh trigger control.

use serde::Serialize;

/// Label of the idle refresh control.
pub const REFRESH_LABEL: &str = "🔄 Refresh";

/// Label of the refresh control while a cycle is in flight.
pub const LOADING_LABEL: &str = "🔄 Loading...";

/// The manual refresh trigger.
///
/// While disabled, manual triggers are ignored. The timer does not consult
/// this control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RefreshControl {
    disabled: bool,
    label: &'static str,
}

impl RefreshControl {
    /// An enabled control showing the refresh label.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            disabled: false,
            label: REFRESH_LABEL,
        }
    }

    /// Disables the control and shows the loading label.
    pub fn begin_loading(&mut self) {
        self.disabled = true;
        self.label = LOADING_LABEL;
    }

    /// Re-enables the control and restores the refresh label.
    pub fn restore(&mut self) {
        self.disabled = false;
        self.label = REFRESH_LABEL;
    }

    /// Returns true while a refresh is in flight.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        self.label
    }
}

impl Default for RefreshControl {
    fn default() -> Self {
        Self::new()
    }
}
