//! Reusable TUI widget components for the Dataflow dashboard.
//!
//! Provides higher-level building blocks on top of ratatui primitives:
//! - [`StatCard`] - Summary field showing a labeled value
//! - [`TimeSeriesChart`] - Filled line chart of log volume over time
//! - [`LevelBreakdown`] - Per-level proportions with a colored legend
//! - [`HostBars`] - Vertical bar per host

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart as LineChart, Dataset, GraphType,
        LegendPosition, Paragraph,
    },
    Frame,
};
use shared::view::{Chart, Legend, Rgb};

/// Converts a view color to a terminal color.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Builds a titled, bordered block.
pub fn titled(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
}

/// Upper bound of a zero-based count axis, with a little headroom.
pub fn axis_ceiling(max: u64) -> u64 {
    if max == 0 {
        1
    } else {
        max.saturating_add(max.div_ceil(10))
    }
}

/// Divisor that brings bar values into a range ratatui can scale without
/// overflowing. The real value is still shown as the bar's text.
pub fn bar_scale(max: u64) -> u64 {
    (max >> BAR_VALUE_BITS) + 1
}

/// Bar values are kept below `2^BAR_VALUE_BITS` before rendering.
const BAR_VALUE_BITS: u32 = 32;

/// Whole-number labels for a zero-based count axis: bottom, middle, top.
pub fn count_labels(ceiling: u64) -> Vec<Span<'static>> {
    [0, ceiling / 2, ceiling]
        .into_iter()
        .map(|n| Span::from(n.to_string()))
        .collect()
}

// ── StatCard ────────────────────────────────────────────────────────────────

/// A stat card displaying a labeled value.
pub struct StatCard {
    pub label: String,
    pub value: String,
    pub color: Color,
}

impl StatCard {
    /// Create a new stat card.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color: Color::Cyan,
        }
    }

    /// Set the accent color for the value.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Render the stat card into the given frame area.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let value = Line::from(Span::styled(
            self.value.as_str(),
            Style::default()
                .fg(self.color)
                .add_modifier(Modifier::BOLD),
        ));
        let paragraph = Paragraph::new(value).block(titled(&self.label));
        f.render_widget(paragraph, area);
    }
}

// ── TimeSeriesChart ─────────────────────────────────────────────────────────

/// Line chart of a chart's values, in order, with an optional fill below.
pub struct TimeSeriesChart<'a> {
    pub chart: &'a Chart,
}

impl<'a> TimeSeriesChart<'a> {
    /// Create a new time series chart.
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    /// Plot coordinates: x is the position, y the count.
    #[allow(clippy::cast_precision_loss)]
    fn points(&self) -> Vec<(f64, f64)> {
        self.chart
            .points()
            .enumerate()
            .map(|(i, (_, count))| (i as f64, count as f64))
            .collect()
    }

    /// First, middle, and last time labels.
    fn x_labels(&self) -> Vec<Span<'a>> {
        let labels = self.chart.labels();
        let n = labels.len().min(self.chart.data().len());
        match n {
            0 => Vec::new(),
            1 => vec![Span::from(labels[0].as_str())],
            2 => vec![
                Span::from(labels[0].as_str()),
                Span::from(labels[1].as_str()),
            ],
            _ => vec![
                Span::from(labels[0].as_str()),
                Span::from(labels[n / 2].as_str()),
                Span::from(labels[n - 1].as_str()),
            ],
        }
    }

    /// Render the chart into the given frame area.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let config = self.chart.config();
        let style = &config.style;
        let points = self.points();

        let line_color = style.border_color.map_or(Color::Cyan, color);
        let mut datasets = Vec::with_capacity(2);
        if style.fill {
            if let Some(&fill) = style.background.first() {
                datasets.push(
                    Dataset::default()
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Bar)
                        .style(Style::default().fg(color(fill)).add_modifier(Modifier::DIM))
                        .data(&points),
                );
            }
        }
        let mut line = Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(line_color))
            .data(&points);
        if let Some(label) = style.label {
            line = line.name(label);
        }
        datasets.push(line);

        let ceiling = axis_ceiling(self.chart.max_value());
        let x_max = points.len().saturating_sub(1).max(1) as f64;

        let chart = LineChart::new(datasets)
            .block(titled(config.title))
            .legend_position(legend_position(config.legend))
            .x_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, x_max])
                    .labels(self.x_labels()),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::DarkGray))
                    .bounds([0.0, ceiling as f64])
                    .labels(count_labels(ceiling)),
            );
        f.render_widget(chart, area);
    }
}

fn legend_position(legend: Legend) -> Option<LegendPosition> {
    match legend {
        Legend::Hidden => None,
        Legend::Top => Some(LegendPosition::Top),
        Legend::Right => Some(LegendPosition::Right),
    }
}

// ── LevelBreakdown ──────────────────────────────────────────────────────────

/// Share of each level, drawn as horizontal bars in the level palette with a
/// legend of percentages on the right.
pub struct LevelBreakdown<'a> {
    pub chart: &'a Chart,
}

impl<'a> LevelBreakdown<'a> {
    /// Create a new level breakdown.
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    fn slice_color(&self, index: usize) -> Color {
        self.chart.background_at(index).map_or(Color::Gray, color)
    }

    /// Legend lines: a colored swatch, the label, and its share of the total.
    pub fn legend(&self) -> Vec<Line<'a>> {
        let total = self
            .chart
            .points()
            .fold(0u64, |acc, (_, v)| acc.saturating_add(v));
        self.chart
            .points()
            .enumerate()
            .map(|(i, (label, value))| {
                Line::from(vec![
                    Span::styled("■ ", Style::default().fg(self.slice_color(i))),
                    Span::raw(format!("{label} {}", percent(value, total))),
                ])
            })
            .collect()
    }

    /// Render the breakdown into the given frame area.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let block = titled(self.chart.config().title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let legend = self.legend();
        let legend_width = legend.iter().map(Line::width).max().unwrap_or(0);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(u16::try_from(legend_width + 2).unwrap_or(u16::MAX)),
            ])
            .split(inner);

        let scale = bar_scale(self.chart.max_value());
        let bars: Vec<Bar> = self
            .chart
            .points()
            .enumerate()
            .map(|(i, (_, value))| {
                Bar::default()
                    .value(value / scale)
                    .text_value(value.to_string())
                    .style(Style::default().fg(self.slice_color(i)))
                    .value_style(Style::default().fg(Color::Black).bg(self.slice_color(i)))
            })
            .collect();

        let chart = BarChart::default()
            .direction(Direction::Horizontal)
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(0);
        f.render_widget(chart, chunks[0]);

        let legend = Paragraph::new(legend).block(Block::default().borders(Borders::LEFT));
        f.render_widget(legend, chunks[1]);
    }
}

/// Share of `total` as a whole percentage.
pub fn percent(value: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    let share = u128::from(value) * 100 / u128::from(total);
    format!("{share}%")
}

// ── HostBars ────────────────────────────────────────────────────────────────

/// One vertical bar per host.
pub struct HostBars<'a> {
    pub chart: &'a Chart,
}

impl<'a> HostBars<'a> {
    /// Create a new host bar chart.
    pub fn new(chart: &'a Chart) -> Self {
        Self { chart }
    }

    /// Render the bars into the given frame area.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let style = &self.chart.config().style;
        let fill = style.background.first().map_or(Color::Magenta, |&c| color(c));
        let border = style.border_color.map_or(fill, color);

        let max = self.chart.max_value();
        let scale = bar_scale(max);
        let bars: Vec<Bar> = self
            .chart
            .points()
            .map(|(host, value)| {
                Bar::default()
                    .label(Line::from(host.to_string()))
                    .value(value / scale)
                    .text_value(value.to_string())
                    .style(Style::default().fg(fill))
                    .value_style(Style::default().fg(Color::White).bg(border))
            })
            .collect();

        let chart = BarChart::default()
            .block(titled(self.chart.config().title))
            .data(BarGroup::default().bars(&bars))
            .max(axis_ceiling(max / scale))
            .bar_width(8)
            .bar_gap(2);
        f.render_widget(chart, area);
    }
}
