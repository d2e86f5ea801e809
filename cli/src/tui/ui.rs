//! UI layout and rendering for the Dataflow TUI dashboard.
//!
//! Top to bottom: connection header, summary cards, the time series chart,
//! the level and host charts side by side, and a key help bar.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use shared::view::{DashboardView, ElementId, LEVEL_PALETTE};

use super::widgets::{self, titled, HostBars, LevelBreakdown, StatCard, TimeSeriesChart};

/// Top-level rendering function.
pub fn draw(f: &mut Frame, view: &DashboardView, api_url: &str) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Header
            Constraint::Length(3),      // Summary cards
            Constraint::Percentage(45), // Time series
            Constraint::Min(0),         // Levels and hosts
            Constraint::Length(1),      // Help bar
        ])
        .split(f.area());

    draw_header(f, view, chunks[0]);
    draw_summary(f, view, chunks[1]);
    TimeSeriesChart::new(&view.charts().time).render(f, chunks[2]);
    draw_distributions(f, view, chunks[3]);
    draw_help_bar(f, api_url, chunks[4]);
}

// ── Header ──────────────────────────────────────────────────────────────────

fn draw_header(f: &mut Frame, view: &DashboardView, area: Rect) {
    let status_color = view
        .status()
        .map_or(Color::Yellow, |s| widgets::color(s.color()));
    let status_text = view.text(ElementId::StatusText).unwrap_or_default();

    let control = view.refresh_control();
    let button_style = if control.is_disabled() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled("● ", Style::default().fg(status_color)),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw("   Last update: "),
        Span::raw(view.text(ElementId::LastUpdate).unwrap_or_default()),
        Span::raw("   "),
        Span::styled(format!("[{}]", control.label()), button_style),
    ]);

    let header = Paragraph::new(line).block(titled("Dataflow Monitor"));
    f.render_widget(header, area);
}

// ── Summary Cards ───────────────────────────────────────────────────────────

fn draw_summary(f: &mut Frame, view: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    let cards = [
        ("Total Logs", ElementId::TotalLogs, Color::Cyan),
        ("Errors", ElementId::ErrorCount, widgets::color(LEVEL_PALETTE[0])),
        ("Warnings", ElementId::WarningCount, widgets::color(LEVEL_PALETTE[1])),
        ("Hosts", ElementId::HostCount, Color::Cyan),
    ];

    for ((label, id, color), area) in cards.into_iter().zip(chunks.iter()) {
        StatCard::new(label, view.text(id).unwrap_or_default())
            .with_color(color)
            .render(f, *area);
    }
}

// ── Distributions ───────────────────────────────────────────────────────────

fn draw_distributions(f: &mut Frame, view: &DashboardView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    LevelBreakdown::new(&view.charts().levels).render(f, chunks[0]);
    HostBars::new(&view.charts().hosts).render(f, chunks[1]);
}

// ── Help Bar ────────────────────────────────────────────────────────────────

fn draw_help_bar(f: &mut Frame, api_url: &str, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " r:refresh  q:quit ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {api_url}")),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
