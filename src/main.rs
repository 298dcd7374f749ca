//! nregadash - District performance dashboard for the rural employment scheme
//!
//! A terminal UI application that tracks employment, wages, works, and
//! payment performance for every reporting district, backed by the public
//! data.gov.in API.

mod app;
mod cache;
mod cli;
mod config;
mod data;
mod metrics;
mod ui;

use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, AppState};
use cli::{Cli, StartupConfig};
use config::Config;
use data::DataClient;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &mut App) {
    match app.state {
        AppState::Loading => {
            render_loading(frame);
        }
        AppState::DistrictList => {
            ui::render_district_list(frame, app);
        }
        AppState::DistrictDetail => {
            ui::render_district_detail(frame, app);
        }
    }

    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::{Color, Style},
        widgets::Paragraph,
    };

    let area = frame.area();

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Loading district data...")
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A .env file can carry the API key during development
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let startup = match StartupConfig::from_cli(&cli) {
        Ok(startup) => startup,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    // The terminal UI owns stdout, so logs go to a file when asked for
    if let Some(path) = &startup.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(file))
            .with_ansi(false)
            .init();
        info!("nregadash {} starting", env!("CARGO_PKG_VERSION"));
    }

    // Demo mode never talks to the API, so it skips key resolution
    let api_key = if startup.demo {
        "demo".to_string()
    } else {
        match Config::load() {
            Ok(config) => config.api_key,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
    };

    let client = DataClient::new(api_key);

    // Health probe prints its result and exits without entering the UI
    if startup.health {
        let status = client.check_health().await;
        if status.healthy {
            println!(
                "data.gov.in reachable ({} ms)",
                status.response_time.as_millis()
            );
            std::process::exit(0);
        } else {
            let reason = status
                .error
                .unwrap_or_else(|| "unknown error".to_string());
            eprintln!("data.gov.in unreachable: {reason}");
            std::process::exit(1);
        }
    }

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::with_startup_config(client, startup);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &mut app))?;

    // Trigger initial data load
    app.load_districts().await;

    // Main event loop
    loop {
        // Render UI
        terminal.draw(|f| render_ui(f, &mut app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }

        // Run any data loads the key handlers asked for. District records
        // load before the comparison so a refresh ranks fresh figures.
        if app.refresh_requested {
            app.refresh_requested = false;
            app.load_districts().await;
        }
        if app.detail_load_requested {
            app.detail_load_requested = false;
            app.load_district_data().await;
        }
        if app.comparison_load_requested {
            app.comparison_load_requested = false;
            app.load_comparison().await;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
