//! CachePulse CLI entry point

use anyhow::Context;
use cachepulse::config::{cli::Cli, toml as config_toml, validator};
use cachepulse::monitor::record::parse_interval;
use cachepulse::output::CsvReport;
use cachepulse::util::time::now_timestamp;
use cachepulse::{MonitorConfig, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config_toml::load(&cli)?;
    validator::validate_config(&config).context("Configuration validation failed")?;

    let input: Box<dyn BufRead> = match cli.input {
        Some(ref path) => Box::new(BufReader::new(File::open(path).with_context(
            || format!("Failed to open input file: {}", path.display()),
        )?)),
        None => Box::new(io::stdin().lock()),
    };

    match config.output {
        Some(ref path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            run_report(&mut file, &config, input)
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            run_report(&mut out, &config, input)
        }
    }
}

/// Replay sample records through the CSV renderer: header first, then one
/// row per entity per interval, bracketed by the interval hooks.
fn run_report<W: Write + IsTerminal>(
    w: &mut W,
    config: &MonitorConfig,
    input: Box<dyn BufRead>,
) -> Result<()> {
    let report = CsvReport::new(
        config.event_set(),
        config.mode,
        config.llc_format,
        config.rmid_capability(),
    );

    report.begin(w)?;

    for (index, line) in input.lines().enumerate() {
        let line = line.context("Failed to read sample records")?;
        if line.trim().is_empty() {
            continue;
        }

        let interval = parse_interval(index + 1, &line)?;
        let timestamp = interval.time.unwrap_or_else(now_timestamp);

        report.interval_header(w, &timestamp)?;
        for record in interval.samples {
            report.row(w, &timestamp, &record.into_sample())?;
        }
        report.interval_footer(w)?;
    }

    report.end(w)?;
    Ok(())
}
