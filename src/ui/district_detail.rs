//! District detail screen UI
//!
//! Renders the detail view for a single district: a tab selector, the
//! active tab's body (current month, comparison, or trends), and a footer
//! with the status line and key hints.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, DetailTab};
use crate::ui::{compare, dashboard, trends};

/// Color scheme shared across the detail sections
mod colors {
    use ratatui::style::Color;

    /// Section headers and borders
    pub const HEADER: Color = Color::Cyan;
    /// Primary text
    pub const PRIMARY: Color = Color::White;
    /// Secondary/dimmed text
    pub const SECONDARY: Color = Color::Gray;
    /// Unknown/unavailable status
    pub const UNKNOWN: Color = Color::DarkGray;
    /// Selected tab indicator and status notices
    pub const SELECTED: Color = Color::Yellow;
}

/// Renders the district detail screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state; the scroll offset is clamped here
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let Some(district) = app.selected_district.clone() else {
        render_no_selection(frame, area);
        return;
    };

    let main_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            format!(" {}, {} ", district.district_name, district.state_name),
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner_area = main_block.inner(area);
    frame.render_widget(main_block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // View selector
            Constraint::Min(0),    // Tab body
            Constraint::Length(2), // Status and help
        ])
        .split(inner_area);

    render_tab_bar(frame, chunks[0], app.detail_tab);

    match app.detail_tab {
        DetailTab::Current => {
            let lines = dashboard::build_dashboard_lines(&app.district_records);
            let max_scroll = (lines.len() as u16).saturating_sub(chunks[1].height);
            if app.detail_scroll > max_scroll {
                app.detail_scroll = max_scroll;
            }
            let paragraph = Paragraph::new(lines).scroll((app.detail_scroll, 0));
            frame.render_widget(paragraph, chunks[1]);
        }
        DetailTab::Compare => compare::render(frame, chunks[1], app),
        DetailTab::Trends => trends::render(frame, chunks[1], app),
    }

    render_footer(frame, chunks[2], app);
}

/// Renders the view selector with the active tab marked
fn render_tab_bar(frame: &mut Frame, area: Rect, current: DetailTab) {
    let tabs = [DetailTab::Current, DetailTab::Compare, DetailTab::Trends];
    let mut spans = vec![Span::styled(
        "View: ",
        Style::default().fg(colors::SECONDARY),
    )];

    for (i, tab) in tabs.iter().enumerate() {
        let is_selected = current == *tab;
        let indicator = if is_selected { "\u{25CF}" } else { "\u{25CB}" }; // ● or ○

        let style = if is_selected {
            Style::default()
                .fg(colors::SELECTED)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::SECONDARY)
        };

        spans.push(Span::raw("["));
        spans.push(Span::styled(indicator, style));
        spans.push(Span::styled(tab.label(), style));
        spans.push(Span::raw("]"));

        if i < tabs.len() - 1 {
            spans.push(Span::raw(" "));
        }
    }

    let paragraph = Paragraph::new(vec![Line::from(spans)]);
    frame.render_widget(paragraph, area);
}

/// Renders the status line and the per-tab key hints
fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let status_line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(colors::SELECTED),
        )),
        None => Line::default(),
    };

    let mut help_spans = vec![
        Span::styled("Esc", Style::default().fg(colors::HEADER)),
        Span::styled(" Back", Style::default().fg(colors::SECONDARY)),
        Span::raw("  "),
        Span::styled("Tab", Style::default().fg(colors::HEADER)),
        Span::styled(" View", Style::default().fg(colors::SECONDARY)),
        Span::raw("  "),
    ];

    match app.detail_tab {
        DetailTab::Current => {
            help_spans.push(Span::styled("j/k", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Scroll",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
        }
        DetailTab::Compare => {
            help_spans.push(Span::styled("m", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Metric",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
            help_spans.push(Span::styled("s", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Scope",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
        }
        DetailTab::Trends => {
            help_spans.push(Span::styled("m", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Metric",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
            help_spans.push(Span::styled("g", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Group",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
            help_spans.push(Span::styled("y", Style::default().fg(colors::HEADER)));
            help_spans.push(Span::styled(
                " Year",
                Style::default().fg(colors::SECONDARY),
            ));
            help_spans.push(Span::raw("  "));
        }
    }

    help_spans.push(Span::styled("r", Style::default().fg(colors::HEADER)));
    help_spans.push(Span::styled(
        " Refresh",
        Style::default().fg(colors::SECONDARY),
    ));
    help_spans.push(Span::raw("  "));
    help_spans.push(Span::styled("?", Style::default().fg(colors::HEADER)));
    help_spans.push(Span::styled(
        " Help",
        Style::default().fg(colors::SECONDARY),
    ));
    help_spans.push(Span::raw("  "));
    help_spans.push(Span::styled("q", Style::default().fg(colors::HEADER)));
    help_spans.push(Span::styled(
        " Quit",
        Style::default().fg(colors::SECONDARY),
    ));

    if let Some(last_refresh) = app.last_refresh {
        let elapsed = Local::now() - last_refresh;
        let mins_ago = elapsed.num_minutes();
        let freshness_text = if mins_ago < 1 {
            " │ Data: just now".to_string()
        } else if mins_ago < 60 {
            format!(" │ Data: {}m ago", mins_ago)
        } else {
            format!(" │ Data: {}h ago", elapsed.num_hours())
        };
        help_spans.push(Span::styled(
            freshness_text,
            Style::default().fg(colors::UNKNOWN),
        ));
    }

    let paragraph = Paragraph::new(vec![status_line, Line::from(help_spans)]);
    frame.render_widget(paragraph, area);
}

/// Renders a fallback when no district is selected
fn render_no_selection(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " District ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let message = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "No district selected",
            Style::default().fg(colors::UNKNOWN),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Esc", Style::default().fg(colors::HEADER)),
            Span::styled(" Back", Style::default().fg(colors::SECONDARY)),
            Span::raw("  "),
            Span::styled("q", Style::default().fg(colors::HEADER)),
            Span::styled(" Quit", Style::default().fg(colors::SECONDARY)),
        ]),
    ]);

    frame.render_widget(message, inner);
}
