//! One-shot rendering of the dashboard view for the `snapshot` command.

use serde::Serialize;
use shared::view::{Chart, DashboardView, ElementId};
use std::fmt::Write;

/// Summary rows in display order.
const SUMMARY_ROWS: [(&str, ElementId); 6] = [
    ("Status", ElementId::StatusText),
    ("Last update", ElementId::LastUpdate),
    ("Total logs", ElementId::TotalLogs),
    ("Errors", ElementId::ErrorCount),
    ("Warnings", ElementId::WarningCount),
    ("Hosts", ElementId::HostCount),
];

#[derive(Serialize)]
struct Report<'a> {
    api_base_url: &'a str,
    connected: bool,
    #[serde(flatten)]
    view: &'a DashboardView,
}

/// Renders the view as pretty-printed JSON.
pub fn render_json(api_base_url: &str, view: &DashboardView) -> serde_json::Result<String> {
    let report = Report {
        api_base_url,
        connected: view.status().is_some_and(|s| s.is_connected()),
        view,
    };
    serde_json::to_string_pretty(&report)
}

/// Renders the view as plain text: the summary fields, then each chart's
/// label/value pairs.
pub fn render_text(api_base_url: &str, view: &DashboardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dataflow Monitor ({api_base_url})");
    for (label, id) in SUMMARY_ROWS {
        let text = view.text(id).unwrap_or_default();
        let _ = writeln!(out, "  {:<12} {text}", format!("{label}:"));
    }

    let charts = view.charts();
    for chart in [&charts.time, &charts.levels, &charts.hosts] {
        out.push('\n');
        write_chart(&mut out, chart);
    }

    out.trim_end().to_string()
}

fn write_chart(out: &mut String, chart: &Chart) {
    let _ = writeln!(out, "{}", chart.config().title);
    if chart.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return;
    }

    let width = chart
        .points()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in chart.points() {
        let _ = writeln!(out, "  {label:<width$}  {value}");
    }
}
