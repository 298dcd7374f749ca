//! Integration tests for CLI argument handling
//!
//! Tests flag parsing and the fail-fast startup paths from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_nregadash"))
        .args(args)
        .output()
        .expect("Failed to execute nregadash")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("nregadash"),
        "Help should mention nregadash"
    );
    assert!(stdout.contains("--demo"), "Help should mention --demo flag");
    assert!(stdout.contains("--tab"), "Help should mention --tab flag");
}

#[test]
fn test_invalid_tab_prints_error_and_exits() {
    let output = run_cli(&["--tab", "bogus"]);
    assert!(!output.status.success(), "Expected invalid tab to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid tab"),
        "Should print error message about the invalid tab: {}",
        stderr
    );
}

#[test]
fn test_tab_with_trends_is_valid() {
    // This test just verifies the argument is accepted (doesn't error immediately)
    // The actual tab routing is tested in unit tests
    let output = run_cli(&["--tab", "trends", "--help"]);
    // With --help, it should succeed regardless of other flags
    // This is a workaround since we can't easily test TUI apps
    assert!(output.status.success());
}

#[test]
fn test_missing_api_key_fails_fast() {
    let home = tempfile::tempdir().expect("temp home");

    // Hide the key from both the environment and the config file lookup;
    // --health keeps the failure path off the terminal UI either way.
    let output = Command::new(env!("CARGO_BIN_EXE_nregadash"))
        .args(["--health"])
        .env_remove("DATA_GOV_API_KEY")
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .current_dir(home.path())
        .output()
        .expect("Failed to execute nregadash");

    assert!(
        !output.status.success(),
        "Expected a missing API key to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("DATA_GOV_API_KEY"),
        "Should name the missing key source: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use nregadash::cli::{parse_tab_arg, Cli, StartTab, StartupConfig};

    #[test]
    fn test_cli_no_args_defaults() {
        let cli = Cli::parse_from(["nregadash"]);
        assert!(cli.state.is_none());
        assert!(cli.district.is_none());
        assert!(cli.tab.is_none());
        assert!(!cli.demo);
        assert!(!cli.health);
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_cli_accepts_state_and_district() {
        let cli = Cli::parse_from(["nregadash", "--state", "BIHAR", "--district", "PATNA"]);
        assert_eq!(cli.state.as_deref(), Some("BIHAR"));
        assert_eq!(cli.district.as_deref(), Some("PATNA"));
    }

    #[test]
    fn test_parse_tab_arg_names() {
        assert_eq!(parse_tab_arg("current").unwrap(), StartTab::Current);
        assert_eq!(parse_tab_arg("compare").unwrap(), StartTab::Compare);
        assert_eq!(parse_tab_arg("trends").unwrap(), StartTab::Trends);
    }

    #[test]
    fn test_parse_tab_arg_aliases_and_case() {
        assert_eq!(parse_tab_arg("overview").unwrap(), StartTab::Current);
        assert_eq!(parse_tab_arg("comparison").unwrap(), StartTab::Compare);
        assert_eq!(parse_tab_arg("history").unwrap(), StartTab::Trends);
        assert_eq!(parse_tab_arg("Trends").unwrap(), StartTab::Trends);
    }

    #[test]
    fn test_parse_tab_arg_invalid_returns_error() {
        assert!(parse_tab_arg("bogus").is_err());
    }

    #[test]
    fn test_startup_config_default_is_normal() {
        let config = StartupConfig::default();
        assert!(config.state.is_none());
        assert!(config.district.is_none());
        assert_eq!(config.tab, StartTab::Current);
        assert!(!config.demo);
        assert!(!config.health);
    }

    #[test]
    fn test_startup_config_from_cli_maps_fields() {
        let cli = Cli::parse_from([
            "nregadash",
            "--district",
            "BHOPAL",
            "--tab",
            "trends",
            "--demo",
        ]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.district.as_deref(), Some("BHOPAL"));
        assert_eq!(config.tab, StartTab::Trends);
        assert!(config.demo);
    }

    #[test]
    fn test_startup_config_from_cli_invalid_tab_errors() {
        let cli = Cli::parse_from(["nregadash", "--tab", "bogus"]);
        assert!(StartupConfig::from_cli(&cli).is_err());
    }
}
