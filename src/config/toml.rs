//! TOML configuration file parsing

use super::cli::Cli;
use super::MonitorConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse a TOML configuration file.
pub fn parse_toml_file(path: &Path) -> Result<MonitorConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse a TOML configuration from a string.
pub fn parse_toml_string(contents: &str) -> Result<MonitorConfig> {
    let config: MonitorConfig =
        ::toml::from_str(contents).context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Merge CLI arguments with a loaded configuration (CLI takes precedence).
pub fn merge_cli_with_config(cli: &Cli, mut config: MonitorConfig) -> MonitorConfig {
    if !cli.events.is_empty() {
        config.events = cli.events.clone();
    }
    if let Some(mode) = cli.mode {
        config.mode = mode;
    }
    if let Some(llc_format) = cli.llc_format {
        config.llc_format = llc_format;
    }
    if let Some(interface) = cli.interface {
        config.interface = interface;
    }
    if cli.rmid {
        config.rmid_tracking = true;
    }
    if let Some(ref output) = cli.output {
        config.output = Some(output.clone());
    }

    config
}

/// Resolve the effective configuration: the TOML file when given, merged
/// with CLI overrides.
pub fn load(cli: &Cli) -> Result<MonitorConfig> {
    let base = match cli.config {
        Some(ref path) => parse_toml_file(path)?,
        None => MonitorConfig::default(),
    };

    Ok(merge_cli_with_config(cli, base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Interface;
    use crate::monitor::{EventKind, LlcFormat, MonitoringMode};
    use clap::Parser;
    use std::io::Write as _;

    #[test]
    fn test_parse_toml_string() {
        let config = parse_toml_string(
            r#"
            events = ["ipc", "llc-occup", "mbt"]
            mode = "process"
            llc_format = "percent"
            interface = "msr"
            rmid_tracking = false
            "#,
        )
        .unwrap();

        assert_eq!(
            config.events,
            vec![EventKind::Ipc, EventKind::LlcOccup, EventKind::Mbt]
        );
        assert_eq!(config.mode, MonitoringMode::Process);
        assert_eq!(config.llc_format, LlcFormat::Percent);
        assert_eq!(config.interface, Interface::Msr);
        assert!(!config.rmid_tracking);
    }

    #[test]
    fn test_parse_toml_defaults() {
        let config = parse_toml_string("").unwrap();
        assert!(config.events.is_empty());
        assert_eq!(config.mode, MonitoringMode::Core);
        assert_eq!(config.llc_format, LlcFormat::Kilobytes);
        assert_eq!(config.interface, Interface::Os);
    }

    #[test]
    fn test_parse_toml_rejects_unknown_event() {
        assert!(parse_toml_string(r#"events = ["bogus"]"#).is_err());
    }

    #[test]
    fn test_cli_overrides_file_settings() {
        let file = parse_toml_string(
            r#"
            events = ["ipc"]
            mode = "uncore"
            "#,
        )
        .unwrap();

        let cli = Cli::parse_from(["cachepulse", "--events", "mbl,mbr", "--mode", "core"]);
        let merged = merge_cli_with_config(&cli, file);

        assert_eq!(merged.events, vec![EventKind::Mbl, EventKind::Mbr]);
        assert_eq!(merged.mode, MonitoringMode::Core);
    }

    #[test]
    fn test_merge_keeps_file_settings_without_overrides() {
        let file = parse_toml_string(
            r#"
            events = ["ipc"]
            mode = "uncore"
            rmid_tracking = true
            interface = "msr"
            "#,
        )
        .unwrap();

        let cli = Cli::parse_from(["cachepulse"]);
        let merged = merge_cli_with_config(&cli, file);

        assert_eq!(merged.events, vec![EventKind::Ipc]);
        assert_eq!(merged.mode, MonitoringMode::Uncore);
        assert!(merged.rmid_tracking);
        assert_eq!(merged.interface, Interface::Msr);
    }

    #[test]
    fn test_load_reads_file_from_cli_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"events = ["llc-miss"]"#).unwrap();

        let cli = Cli::parse_from([
            "cachepulse",
            "--config",
            file.path().to_str().unwrap(),
            "--mode",
            "process",
        ]);
        let config = load(&cli).unwrap();

        assert_eq!(config.events, vec![EventKind::LlcMiss]);
        assert_eq!(config.mode, MonitoringMode::Process);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let cli = Cli::parse_from(["cachepulse", "--config", "/nonexistent/cachepulse.toml"]);
        assert!(load(&cli).is_err());
    }
}
