//! Comparison tab for the detail view
//!
//! Ranks the selected district against its comparison candidates on one
//! metric, listing each candidate's value and distance from the current
//! district.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::metrics::{Comparison, Standing};

/// Renders the compare tab into `area`.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Controls
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Ranking body
        ])
        .split(area);

    render_controls(frame, chunks[0], app);

    let lines = match &app.comparison {
        Some(comparison) => build_comparison_lines(app, comparison),
        None => vec![Line::from(Span::styled(
            "No comparison available",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    frame.render_widget(Paragraph::new(lines), chunks[2]);
}

/// Control line naming the ranked metric and candidate scope.
fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let metric = app.compare_metric();

    let line = Line::from(vec![
        Span::styled("Metric: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.label(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" [m]", Style::default().fg(Color::Yellow)),
        Span::styled("   Scope: ", Style::default().fg(Color::Gray)),
        Span::styled(
            app.compare_scope.label(),
            Style::default().fg(Color::White),
        ),
        Span::styled(" [s]", Style::default().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Builds the rank summary, candidate rows, and field statistics.
fn build_comparison_lines(app: &App, comparison: &Comparison) -> Vec<Line<'static>> {
    let metric = app.compare_metric();
    let district_name = app
        .selected_district
        .as_ref()
        .map(|d| d.district_name.clone())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                district_name,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" ranks ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("#{}", comparison.rank),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" of {} on {}", comparison.field_size, metric.label()),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled("Current: ", Style::default().fg(Color::Gray)),
            Span::styled(
                metric.format_value(comparison.current_value),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "OTHER DISTRICTS",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    for row in &comparison.rows {
        let (symbol, color) = match row.standing {
            Standing::Better => ("\u{25B2}", Color::Green),
            Standing::Worse => ("\u{25BC}", Color::Red),
            Standing::Equal => ("\u{2500}", Color::DarkGray),
        };

        lines.push(Line::from(vec![
            Span::styled(format!("{} ", symbol), Style::default().fg(color)),
            Span::styled(
                format!("{:<24}", row.district_name),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("{:>12}", metric.format_value(row.value)),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  {:+.1}%", row.percentage_diff),
                Style::default().fg(color),
            ),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("Best: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(comparison.max),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Mean: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(comparison.mean),
            Style::default().fg(Color::White),
        ),
        Span::styled("  Lowest: ", Style::default().fg(Color::Gray)),
        Span::styled(
            metric.format_value(comparison.min),
            Style::default().fg(Color::White),
        ),
    ]));

    lines
}
