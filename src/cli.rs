//! Command-line interface parsing
//!
//! Handles the startup flags: preselecting a state or district, choosing
//! the detail tab to open on, demo mode, the health probe, and log-file
//! routing.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified tab name is not recognized
    #[error("Invalid tab: '{0}'. Valid tabs: current, compare, trends")]
    InvalidTab(String),
}

/// District-wise MGNREGA performance dashboard
#[derive(Parser, Debug)]
#[command(name = "nregadash")]
#[command(about = "District-wise MGNREGA employment scheme performance dashboard")]
#[command(version)]
pub struct Cli {
    /// Preselect a state filter on the district list (exact upstream name)
    ///
    /// Example: nregadash --state "MADHYA PRADESH"
    #[arg(long, value_name = "STATE")]
    pub state: Option<String>,

    /// Open directly on one district's detail view
    ///
    /// Examples:
    ///   nregadash --district BHOPAL
    ///   nregadash --district BHOPAL --tab trends
    #[arg(long, value_name = "DISTRICT")]
    pub district: Option<String>,

    /// Detail tab to open on: current, compare, or trends
    #[arg(long, value_name = "TAB")]
    pub tab: Option<String>,

    /// Run against the built-in sample dataset, without network access
    #[arg(long)]
    pub demo: bool,

    /// Probe the upstream API, print the result, and exit
    #[arg(long)]
    pub health: bool,

    /// Append logs to this file (the terminal UI keeps stdout for itself)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Detail tab selectable from the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StartTab {
    #[default]
    Current,
    Compare,
    Trends,
}

impl StartTab {
    /// Matches a tab name or alias, case-insensitively.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "current" | "overview" => Some(StartTab::Current),
            "compare" | "comparison" => Some(StartTab::Compare),
            "trends" | "history" => Some(StartTab::Trends),
            _ => None,
        }
    }
}

/// Parses a tab string argument into a StartTab.
pub fn parse_tab_arg(s: &str) -> Result<StartTab, CliError> {
    StartTab::from_str(s).ok_or_else(|| CliError::InvalidTab(s.to_string()))
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    /// State filter to apply before the first render
    pub state: Option<String>,
    /// District to open directly, skipping the list
    pub district: Option<String>,
    /// Detail tab to open on when a district is shown
    pub tab: StartTab,
    /// Whether to run on the built-in sample dataset
    pub demo: bool,
    /// Whether to probe the API and exit instead of starting the UI
    pub health: bool,
    /// Log destination, if any
    pub log_file: Option<PathBuf>,
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments, validating the
    /// tab name.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let tab = match &cli.tab {
            None => StartTab::default(),
            Some(raw) => parse_tab_arg(raw)?,
        };

        Ok(StartupConfig {
            state: cli.state.clone(),
            district: cli.district.clone(),
            tab,
            demo: cli.demo,
            health: cli.health,
            log_file: cli.log_file.clone(),
        })
    }
}
