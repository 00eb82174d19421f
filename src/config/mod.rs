//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! A report's configuration is resolved once at startup and treated as a
//! read-only snapshot by the renderers.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::monitor::{EventKind, EventSet, LlcFormat, MonitoringMode};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Hardware backend the samples were collected through.
///
/// The legacy register backend (`Msr`) is the only one that exposes RMID
/// associations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Interface {
    /// Legacy model-specific-register backend
    Msr,
    /// OS-managed resctrl backend
    Os,
}

impl Default for Interface {
    fn default() -> Self {
        Self::Os
    }
}

/// Complete report configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Events to report; all events when empty.
    #[serde(default)]
    pub events: Vec<EventKind>,
    /// Reporting granularity.
    #[serde(default)]
    pub mode: MonitoringMode,
    /// Unit for the LLC occupancy column label.
    #[serde(default)]
    pub llc_format: LlcFormat,
    /// Backend the samples were collected through.
    #[serde(default)]
    pub interface: Interface,
    /// Track RMID associations (MSR interface, core mode only).
    #[serde(default)]
    pub rmid_tracking: bool,
    /// Destination file; stdout when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl MonitorConfig {
    /// The enabled event set. An empty `events` list means every event.
    pub fn event_set(&self) -> EventSet {
        if self.events.is_empty() {
            EventSet::all()
        } else {
            EventSet::from_kinds(self.events.iter().copied())
        }
    }

    /// Legacy register capability, resolved once at startup.
    ///
    /// Only an MSR-backed core-mode report carries the RMID column.
    pub fn rmid_capability(&self) -> bool {
        self.rmid_tracking
            && self.interface == Interface::Msr
            && self.mode == MonitoringMode::Core
    }
}
