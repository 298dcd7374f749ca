//! Historical trends tab for the detail view
//!
//! Charts one metric across the selected district's monthly or yearly
//! records, with summary statistics and a recent-periods table below.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::metrics::{trend_series, trend_stats, TrendDirection, TrendPoint};
use crate::ui::widgets::bars::MetricBars;

/// Rows of the bar chart area.
const CHART_ROWS: u16 = 6;

/// Bars drawn per point; must stay in step with [`MetricBars`] defaults.
const BAR_STEP: usize = 3;

/// How many of the newest points the recent-periods table lists.
const RECENT_ROWS: usize = 6;

/// Renders the trends tab into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let metric = app.trend_metric();
    let series = trend_series(
        &app.district_records,
        app.trend_granularity,
        app.trend_year.as_deref(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),          // Controls
            Constraint::Length(1),          // Spacer
            Constraint::Length(CHART_ROWS), // Bar chart
            Constraint::Length(1),          // Axis labels
            Constraint::Length(1),          // Statistics
            Constraint::Length(1),          // Spacer
            Constraint::Min(0),             // Recent periods
        ])
        .split(area);

    render_controls(frame, chunks[0], app);

    if series.is_empty() {
        let message = Paragraph::new(Line::from(Span::styled(
            "No trend data for this selection",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(message, chunks[2]);
        return;
    }

    let values: Vec<f64> = series.iter().map(|p| metric.value(&p.record)).collect();
    let bars = MetricBars::new(&values).highlight(values.len() - 1);
    frame.render_widget(bars, chunks[2]);

    render_axis(frame, chunks[3], &series);
    render_stats(frame, chunks[4], app, &series);
    render_recent(frame, chunks[6], app, &series);
}

/// Control line naming the charted metric, grouping, and year filter.
fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let metric = app.trend_metric();
    let year = app
        .trend_year
        .clone()
        .unwrap_or_else(|| "All years".to_string());

    let line = Line::from(vec![
        Span::styled("Metric: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" [m]", Style::default().fg(Color::Yellow)),
        Span::styled("   Group: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.trend_granularity.label(),
            Style::default().fg(Color::White),
        ),
        Span::styled(" [g]", Style::default().fg(Color::Yellow)),
        Span::styled("   Year: ", Style::default().fg(Color::Gray)),
        Span::styled(year, Style::default().fg(Color::White)),
        Span::styled(" [y]", Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// First and last visible period labels under the chart. The chart keeps
/// the newest points when the series outgrows the width, so the labels
/// follow the same cut.
fn render_axis(frame: &mut Frame, area: Rect, series: &[TrendPoint]) {
    let width = area.width as usize;
    let capacity = (width + 1) / BAR_STEP;
    let skip = series.len().saturating_sub(capacity);
    let visible = &series[skip..];

    let (Some(first), Some(last)) = (visible.first(), visible.last()) else {
        return;
    };

    let mut spans = vec![Span::styled(
        first.period.clone(),
        Style::default().fg(Color::DarkGray),
    )];
    if visible.len() > 1 {
        let padding = width.saturating_sub(first.period.len() + last.period.len());
        spans.push(Span::raw(" ".repeat(padding)));
        spans.push(Span::styled(
            last.period.clone(),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Summary statistics line for the charted metric.
fn render_stats(frame: &mut Frame, area: Rect, app: &App, series: &[TrendPoint]) {
    let metric = app.trend_metric();
    let Some(stats) = trend_stats(series, metric) else {
        return;
    };

    let (arrow, change_color) = match stats.direction {
        TrendDirection::Up => ("\u{2191}", Color::Green),
        TrendDirection::Down => ("\u{2193}", Color::Red),
        TrendDirection::Stable => ("\u{2192}", Color::DarkGray),
    };

    let line = Line::from(vec![
        Span::styled("Current: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(stats.current),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            format!("{} {:+.1}%", arrow, stats.percentage_change),
            Style::default().fg(change_color),
        ),
        Span::styled("  Min: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(stats.min),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Max: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(stats.max),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Mean: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(stats.mean),
            Style::default().fg(Color::White),
        ),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Table of the newest periods with their values, newest first.
fn render_recent(frame: &mut Frame, area: Rect, app: &App, series: &[TrendPoint]) {
    let metric = app.trend_metric();

    let mut lines = vec![Line::from(Span::styled(
        "RECENT PERIODS",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    for point in series.iter().rev().take(RECENT_ROWS) {
        let value = metric.value(&point.record);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16}", point.period),
                Style::default().fg(Color::Gray),
            ),
            Span::styled(
                metric.format_value(value),
                Style::default().fg(Color::White),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), area);
}
