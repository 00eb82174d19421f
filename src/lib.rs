//! CachePulse - Cache and memory-bandwidth telemetry reporting
//!
//! CachePulse renders periodic hardware-telemetry samples (cache occupancy,
//! memory bandwidth, IPC, last-level-cache miss/reference counts and their
//! PCIe breakdowns) into a machine-parsable CSV table: one header line
//! describing the active columns, one data line per monitored entity per
//! sampling interval.
//!
//! # Architecture
//!
//! - **Event model**: bitmask event sets and per-entity samples
//! - **CSV renderer**: header/row rendering with placeholder columns for
//!   enabled-but-unmeasured events
//! - **Replay input**: JSON-lines sample records from an external collector
//! - **Configuration**: CLI and TOML with validation
//!
//! Counter acquisition, entity selection, and backend programming live in
//! the collector that produces the sample records; this crate only renders
//! their already-computed values.

pub mod config;
pub mod monitor;
pub mod output;
pub mod util;

// Re-export commonly used types
pub use config::MonitorConfig;
pub use output::CsvReport;

/// Result type used throughout CachePulse
pub type Result<T> = anyhow::Result<T>;
