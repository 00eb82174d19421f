//! CLI argument parsing using clap

use super::Interface;
use crate::monitor::{EventKind, LlcFormat, MonitoringMode};
use clap::Parser;
use std::path::PathBuf;

/// cachepulse - cache and memory-bandwidth telemetry reporter
#[derive(Parser, Debug)]
#[command(name = "cachepulse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file (CLI flags override file settings)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Events to report (comma-separated); all events when omitted
    #[arg(short = 'e', long, value_enum, value_delimiter = ',')]
    pub events: Vec<EventKind>,

    /// Reporting granularity
    #[arg(short = 'm', long, value_enum)]
    pub mode: Option<MonitoringMode>,

    /// Unit for the LLC occupancy column label
    #[arg(long, value_enum)]
    pub llc_format: Option<LlcFormat>,

    /// Hardware backend the samples were collected through
    #[arg(long, value_enum)]
    pub interface: Option<Interface>,

    /// Include the RMID association column (MSR interface, core mode only)
    #[arg(long)]
    pub rmid: bool,

    /// Sample records to replay (JSON lines); stdin when omitted
    #[arg(short = 'i', long)]
    pub input: Option<PathBuf>,

    /// Destination file; stdout when omitted
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,
}
