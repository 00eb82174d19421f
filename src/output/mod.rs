//! Report output formats
//!
//! Rendering of telemetry samples for consumption outside the tool. The
//! CSV format is line-oriented and machine-parsable: one header line
//! describing the active columns, one data line per monitored entity per
//! sampling interval.

pub mod csv;

pub use csv::CsvReport;
