//! Chart adapter.
//!
//! A [`Chart`] pairs a fixed [`ChartConfig`] with the label and value
//! sequences currently on display. [`Chart::update`] swaps both sequences and
//! bumps the chart's revision, which is what the renderer watches to redraw.
//!
//! Label and value lengths are not checked against each other. A renderer
//! pairs them positionally and stops at the shorter sequence.

use serde::Serialize;

use super::color::Rgb;
use super::ElementId;

/// Doughnut palette, applied to slices by position: error, warn, info, debug, other.
pub const LEVEL_PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xef_44_44),
    Rgb::from_hex(0xf5_9e_0b),
    Rgb::from_hex(0x10_b9_81),
    Rgb::from_hex(0x3b_82_f6),
    Rgb::from_hex(0x8b_5c_f6),
];

/// Line color of the time-series chart.
pub const TIME_SERIES_BORDER: Rgb = Rgb::from_hex(0x66_7e_ea);

/// Bar fill of the host chart.
pub const HOST_BAR_FILL: Rgb = Rgb::from_hex(0x76_4b_a2);

/// Bar border of the host chart.
pub const HOST_BAR_BORDER: Rgb = Rgb::from_hex(0x5a_37_81);

/// Dataset label shown for the line and bar charts.
pub const LOG_COUNT_LABEL: &str = "Log Count";

/// The kind of chart being drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// A line through the values, in order.
    Line,
    /// Slices proportional to the values.
    Doughnut,
    /// One vertical bar per value.
    Bar,
}

/// Where the legend is drawn, if at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Legend {
    /// No legend.
    Hidden,
    /// Above the plot.
    Top,
    /// Right of the plot.
    Right,
}

/// Y axis options for charts that have one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YAxis {
    /// Whether the axis always includes zero.
    pub begin_at_zero: bool,
    /// Number of decimals shown on ticks.
    pub precision: u8,
}

impl YAxis {
    /// A zero-based axis with whole-number ticks.
    pub const COUNTS: Self = Self {
        begin_at_zero: true,
        precision: 0,
    };
}

/// Visual style of the chart's primary dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DatasetStyle {
    /// Dataset label, if the chart shows one.
    pub label: Option<&'static str>,
    /// Outline color.
    pub border_color: Option<Rgb>,
    /// Outline width in cells.
    pub border_width: u16,
    /// Fill colors; a single entry for line and bar charts, one per slice for doughnuts.
    pub background: &'static [Rgb],
    /// Opacity of the fill, from 0.0 to 1.0.
    pub background_alpha: f32,
    /// Whether the area under a line is filled.
    pub fill: bool,
    /// Bezier curve tension of a line; 0.0 draws straight segments.
    pub tension: f32,
}

/// Static configuration of one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartConfig {
    /// Element the chart is mounted on.
    pub id: ElementId,
    /// Title of the pane holding the chart.
    pub title: &'static str,
    /// Kind of chart.
    pub kind: ChartKind,
    /// Legend placement.
    pub legend: Legend,
    /// Y axis, for charts that have one.
    pub y_axis: Option<YAxis>,
    /// Dataset style.
    pub style: DatasetStyle,
}

impl ChartConfig {
    /// Filled line chart of log volume over time.
    #[must_use]
    pub const fn time_series() -> Self {
        Self {
            id: ElementId::TimeChart,
            title: "Logs Over Time",
            kind: ChartKind::Line,
            legend: Legend::Top,
            y_axis: Some(YAxis::COUNTS),
            style: DatasetStyle {
                label: Some(LOG_COUNT_LABEL),
                border_color: Some(TIME_SERIES_BORDER),
                border_width: 1,
                background: &[TIME_SERIES_BORDER],
                background_alpha: 0.1,
                fill: true,
                tension: 0.4,
            },
        }
    }

    /// Doughnut chart of log volume per severity label.
    #[must_use]
    pub const fn level_distribution() -> Self {
        Self {
            id: ElementId::LevelChart,
            title: "Log Levels",
            kind: ChartKind::Doughnut,
            legend: Legend::Right,
            y_axis: None,
            style: DatasetStyle {
                label: None,
                border_color: None,
                border_width: 0,
                background: &LEVEL_PALETTE,
                background_alpha: 1.0,
                fill: true,
                tension: 0.0,
            },
        }
    }

    /// Bar chart of log volume per host.
    #[must_use]
    pub const fn host_distribution() -> Self {
        Self {
            id: ElementId::HostChart,
            title: "Top Hosts",
            kind: ChartKind::Bar,
            legend: Legend::Hidden,
            y_axis: Some(YAxis::COUNTS),
            style: DatasetStyle {
                label: Some(LOG_COUNT_LABEL),
                border_color: Some(HOST_BAR_BORDER),
                border_width: 1,
                background: &[HOST_BAR_FILL],
                background_alpha: 1.0,
                fill: true,
                tension: 0.0,
            },
        }
    }
}

/// A chart instance and the data it currently displays.
#[derive(Debug, Clone, Serialize)]
pub struct Chart {
    #[serde(skip)]
    config: ChartConfig,
    labels: Vec<String>,
    data: Vec<u64>,
    #[serde(skip)]
    revision: u64,
}

impl Chart {
    /// Creates an empty chart with the given configuration.
    #[must_use]
    pub fn new(config: ChartConfig) -> Self {
        Self {
            config,
            labels: Vec::new(),
            data: Vec::new(),
            revision: 0,
        }
    }

    /// Replaces the labels and the primary dataset's values, then marks the
    /// chart for redraw.
    ///
    /// ```
    /// use shared::view::{Chart, ChartConfig};
    ///
    /// let mut chart = Chart::new(ChartConfig::host_distribution());
    /// chart.update(vec!["a".into(), "b".into()], vec![4, 4]);
    ///
    /// assert_eq!(chart.len(), 2);
    /// assert_eq!(chart.revision(), 1);
    /// ```
    pub fn update(&mut self, labels: Vec<String>, data: Vec<u64>) {
        self.labels = labels;
        self.data = data;
        self.revision += 1;

        tracing::trace!(
            chart = %self.config.id,
            points = self.data.len(),
            revision = self.revision,
            "Chart updated"
        );
    }

    /// Returns the chart configuration.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Returns the labels on display.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the values on display.
    #[must_use]
    pub fn data(&self) -> &[u64] {
        &self.data
    }

    /// Number of updates applied since the chart was created.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Number of points, slices, or bars on display.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chart has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates over `(label, value)` pairs, stopping at the shorter sequence.
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.data.iter().copied())
    }

    /// Largest value on display, or zero for an empty chart.
    #[must_use]
    pub fn max_value(&self) -> u64 {
        self.data.iter().copied().max().unwrap_or(0)
    }

    /// Fill color of the element at `index`. Palettes wrap around.
    #[must_use]
    pub fn background_at(&self, index: usize) -> Option<Rgb> {
        let palette = self.config.style.background;
        if palette.is_empty() {
            return None;
        }
        Some(palette[index % palette.len()])
    }
}

/// The three chart instances of the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct Charts {
    /// Log volume over time.
    pub time: Chart,
    /// Log volume per level.
    pub levels: Chart,
    /// Log volume per host.
    pub hosts: Chart,
}

impl Charts {
    /// Creates the three charts with their fixed configurations and no data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            time: Chart::new(ChartConfig::time_series()),
            levels: Chart::new(ChartConfig::level_distribution()),
            hosts: Chart::new(ChartConfig::host_distribution()),
        }
    }
}

impl Default for Charts {
    fn default() -> Self {
        Self::new()
    }
}
