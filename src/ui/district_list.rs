//! District list screen rendering
//!
//! Renders the main district browser showing every district returned by the
//! employment API, with search and state filtering applied.

use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;

/// Renders the district list screen
///
/// Displays all known districts in a bordered list with:
/// - Header with time, district count, and the active search or state filter
/// - District name and parent state per row
/// - Help text with data freshness at the bottom
///
/// The currently selected district is highlighted with a cursor indicator
/// and different colors.
///
/// # Arguments
/// * `frame` - The ratatui Frame to render to
/// * `app` - The application state containing district data and selection
pub fn render_district_list(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with filters
            Constraint::Min(3),    // District list
            Constraint::Length(1), // Help text
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_list(frame, app, chunks[1]);
    render_help(frame, chunks[2], app);
}

/// Renders the header with time, counts, and the active filter line
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let now = Local::now();
    let time_str = now.format("%a %b %d, %H:%M").to_string();
    let visible = app.visible_districts().len();

    let count_str = if visible == app.districts.len() {
        format!("{} districts", visible)
    } else {
        format!("{} of {} districts", visible, app.districts.len())
    };

    let width = area.width as usize;
    let separator = "─".repeat(width.saturating_sub(2));

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "NREGADASH",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(time_str, Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(count_str, Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        )),
    ];

    // Filter line: live search input takes priority, then the state filter
    if app.search_active {
        lines.push(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.search_input.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled("\u{258C}", Style::default().fg(Color::White)),
        ]));
    } else if !app.search_input.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.search_input.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                "  (/ edits, Esc clears)",
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    } else if let Some(ref state) = app.state_filter {
        lines.push(Line::from(vec![
            Span::styled("State: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  (s cycles)", Style::default().fg(Color::DarkGray)),
        ]));
    } else {
        lines.push(Line::from(Span::styled(
            "All states — press / to search or s to filter by state",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Status line for load errors and confirmations
    if let Some(ref message) = app.status_message {
        lines.push(Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Yellow),
        )));
    }

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, area);
}

/// Renders the scrollable district list content
fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let districts = app.visible_districts();
    let mut lines: Vec<Line> = Vec::with_capacity(districts.len().max(1));

    if districts.is_empty() {
        let message = if app.districts.is_empty() {
            "No districts loaded"
        } else {
            "No districts match the current filter"
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(Color::DarkGray),
        )));
    }

    for (index, district) in districts.iter().enumerate() {
        let is_selected = index == app.selected_index;

        let cursor = if is_selected { "\u{25B8} " } else { "  " }; // ▸ or space

        let name_style = if is_selected {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        let cursor_style = if is_selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        // Format: " ▸ DISTRICT NAME          STATE NAME"
        let name_padded = format!("{:<24}", district.district_name);

        let spans = vec![
            Span::styled(cursor, cursor_style),
            Span::styled(name_padded, name_style),
            Span::raw(" "),
            Span::styled(
                district.state_name.clone(),
                Style::default().fg(Color::Gray),
            ),
        ];

        lines.push(Line::from(spans));
    }

    // Keep the selection visible when the list outgrows the area
    let inner_height = area.height.saturating_sub(2) as usize;
    let offset = if inner_height > 0 && app.selected_index >= inner_height {
        (app.selected_index + 1 - inner_height) as u16
    } else {
        0
    };

    let block = Block::default()
        .title(" Districts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(lines).block(block).scroll((offset, 0));

    frame.render_widget(paragraph, area);
}

/// Renders the help text at the bottom of the screen with data freshness
fn render_help(frame: &mut Frame, area: Rect, app: &App) {
    let mut help_spans = vec![
        Span::styled("↑/↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Navigate  "),
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(" Open  "),
        Span::styled("/", Style::default().fg(Color::Yellow)),
        Span::raw(" Search  "),
        Span::styled("s", Style::default().fg(Color::Yellow)),
        Span::raw(" State  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::raw(" Help  "),
        Span::styled("q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit"),
    ];

    // Add data freshness indicator
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
            Style::default().fg(Color::DarkGray),
        ));
    }

    let help_text = Line::from(help_spans);
    let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(paragraph, area);
}

/// Alias for render_district_list for compatibility
#[allow(dead_code)]
pub fn render(frame: &mut Frame, app: &App) {
    render_district_list(frame, app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppState;
    use crate::cli::StartupConfig;
    use crate::data::DataClient;
    use ratatui::{backend::TestBackend, Terminal};

    /// Helper to create a demo-mode app without loading any data
    fn create_test_app() -> App {
        let client = DataClient::with_base_url("demo", "http://127.0.0.1:1");
        let config = StartupConfig {
            demo: true,
            ..StartupConfig::default()
        };
        let mut app = App::with_startup_config(client, config);
        app.state = AppState::DistrictList;
        app
    }

    /// Helper to create a demo-mode app with sample districts loaded
    async fn create_loaded_app() -> App {
        let mut app = create_test_app();
        app.load_districts().await;
        app
    }

    fn buffer_string(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_empty_app_shows_placeholder() {
        let app = create_test_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(
            buffer_str.contains("No districts loaded"),
            "Empty list should show placeholder"
        );
    }

    #[tokio::test]
    async fn test_loaded_districts_are_rendered() {
        let app = create_loaded_app().await;
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(buffer_str.contains("BHOPAL"), "First district should render");
        assert!(
            buffer_str.contains("MADHYA PRADESH"),
            "State column should render"
        );
    }

    #[tokio::test]
    async fn test_selected_item_is_highlighted() {
        let app = create_loaded_app().await;
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(
            buffer_str.contains("\u{25B8}"),
            "Selected item should have cursor indicator"
        );
    }

    #[tokio::test]
    async fn test_search_input_is_shown_while_typing() {
        let mut app = create_loaded_app().await;
        app.search_active = true;
        app.search_input = "pat".to_string();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(buffer_str.contains("Search: pat"), "Search line should render");
        assert!(
            buffer_str.contains("PATNA"),
            "Matching district should remain visible"
        );
        assert!(
            !buffer_str.contains("BHOPAL"),
            "Non-matching district should be filtered out"
        );
    }

    #[tokio::test]
    async fn test_state_filter_line_is_shown() {
        let mut app = create_loaded_app().await;
        app.state_filter = Some("BIHAR".to_string());

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(
            buffer_str.contains("State: BIHAR"),
            "State filter line should render"
        );
    }

    #[tokio::test]
    async fn test_status_message_is_rendered() {
        let mut app = create_loaded_app().await;
        app.status_message = Some("Cache cleared (3 entries dropped)".to_string());

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(
            buffer_str.contains("Cache cleared"),
            "Status message should render"
        );
    }

    #[test]
    fn test_help_text_is_rendered() {
        let app = create_test_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(
            buffer_str.contains("Navigate") || buffer_str.contains("Quit"),
            "Help text should be rendered"
        );
    }

    #[test]
    fn test_title_is_rendered() {
        let app = create_test_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render_district_list(frame, &app);
            })
            .unwrap();

        let buffer_str = buffer_string(&terminal);
        assert!(buffer_str.contains("Districts"), "Title should be rendered");
    }

    #[test]
    fn test_render_alias_works() {
        let app = create_test_app();
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal
            .draw(|frame| {
                render(frame, &app);
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let has_content = buffer.content().iter().any(|cell| cell.symbol() != " ");
        assert!(has_content, "Buffer should contain rendered content");
    }
}
