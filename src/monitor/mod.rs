//! Telemetry event model
//!
//! Types shared between the sampling side and the report renderers:
//!
//! - **EventKind / EventSet**: the telemetry kinds a report can carry and
//!   the bitmask of kinds enabled for the current report
//! - **Sample**: one entity's measurements for one sampling interval
//! - **Core lists**: rendering of the core set a monitored process ran on
//!
//! A report is configured with an [`EventSet`]; each [`Sample`] carries only
//! the kinds that were actually measured that interval, which may be a
//! subset of the enabled set when a collector could not read a counter.

pub mod record;

use bitflags::bitflags;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of telemetry event kinds enabled for a report.
    ///
    /// The bit positions follow the display order of [`EventKind::ALL`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EventSet: u32 {
        const IPC            = 1 << 0;
        const LLC_MISS       = 1 << 1;
        const LLC_REF        = 1 << 2;
        const LLC_OCCUP      = 1 << 3;
        const MBL            = 1 << 4;
        const MBR            = 1 << 5;
        const MBT            = 1 << 6;
        const LLC_MISS_READ  = 1 << 7;
        const LLC_MISS_WRITE = 1 << 8;
        const LLC_REF_READ   = 1 << 9;
        const LLC_REF_WRITE  = 1 << 10;
    }
}

impl EventSet {
    /// Build a set from individual kinds.
    pub fn from_kinds<I>(kinds: I) -> Self
    where
        I: IntoIterator<Item = EventKind>,
    {
        kinds
            .into_iter()
            .fold(EventSet::empty(), |set, kind| set | kind.flag())
    }
}

/// One telemetry event kind.
///
/// The kebab-case names (`ipc`, `llc-miss`, `mbl`, ...) are the canonical
/// spelling used by the CLI, TOML configuration, and sample records.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// Instructions retired per cycle
    Ipc,
    /// Last-level cache misses
    LlcMiss,
    /// Last-level cache references
    LlcRef,
    /// Last-level cache occupancy
    LlcOccup,
    /// Local memory bandwidth (MB/s)
    Mbl,
    /// Remote memory bandwidth (MB/s)
    Mbr,
    /// Total memory bandwidth (MB/s)
    Mbt,
    /// LLC misses on PCIe reads
    LlcMissRead,
    /// LLC misses on PCIe writes
    LlcMissWrite,
    /// LLC references on PCIe reads
    LlcRefRead,
    /// LLC references on PCIe writes
    LlcRefWrite,
}

impl EventKind {
    /// Every kind, in report display order.
    pub const ALL: [EventKind; 11] = [
        EventKind::Ipc,
        EventKind::LlcMiss,
        EventKind::LlcRef,
        EventKind::LlcOccup,
        EventKind::Mbl,
        EventKind::Mbr,
        EventKind::Mbt,
        EventKind::LlcMissRead,
        EventKind::LlcMissWrite,
        EventKind::LlcRefRead,
        EventKind::LlcRefWrite,
    ];

    /// The bitmask flag for this kind.
    pub fn flag(self) -> EventSet {
        match self {
            EventKind::Ipc => EventSet::IPC,
            EventKind::LlcMiss => EventSet::LLC_MISS,
            EventKind::LlcRef => EventSet::LLC_REF,
            EventKind::LlcOccup => EventSet::LLC_OCCUP,
            EventKind::Mbl => EventSet::MBL,
            EventKind::Mbr => EventSet::MBR,
            EventKind::Mbt => EventSet::MBT,
            EventKind::LlcMissRead => EventSet::LLC_MISS_READ,
            EventKind::LlcMissWrite => EventSet::LLC_MISS_WRITE,
            EventKind::LlcRefRead => EventSet::LLC_REF_READ,
            EventKind::LlcRefWrite => EventSet::LLC_REF_WRITE,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Reporting granularity: which entity each row describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MonitoringMode {
    /// One row per monitored core
    Core,
    /// One row per monitored process
    Process,
    /// One row per socket (uncore counters)
    Uncore,
}

impl Default for MonitoringMode {
    fn default() -> Self {
        Self::Core
    }
}

/// Unit for the LLC occupancy column label.
///
/// The unit only changes the header label; row values keep the same
/// one-decimal format either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LlcFormat {
    Kilobytes,
    Percent,
}

impl Default for LlcFormat {
    fn default() -> Self {
        Self::Kilobytes
    }
}

/// Measured values for one sample, keyed by event kind.
///
/// A slot is populated only when the kind was actually measured that
/// interval; [`EventValues::measured`] recovers the set of populated kinds.
#[derive(Debug, Clone, Default)]
pub struct EventValues {
    slots: [Option<f64>; EventKind::ALL.len()],
}

impl EventValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a measured value for `kind`.
    pub fn set(&mut self, kind: EventKind, value: f64) {
        self.slots[kind.index()] = Some(value);
    }

    /// The measured value for `kind`, if any.
    pub fn get(&self, kind: EventKind) -> Option<f64> {
        self.slots[kind.index()]
    }

    /// The set of kinds that hold a measured value.
    pub fn measured(&self) -> EventSet {
        EventKind::ALL
            .iter()
            .filter(|kind| self.get(**kind).is_some())
            .fold(EventSet::empty(), |set, kind| set | kind.flag())
    }
}

/// One entity's measurements at one sampling interval.
///
/// The context string is the entity identity as the sampler reported it
/// (core id, PID, or socket id, depending on the report mode) and is
/// treated as opaque text by the renderers.
#[derive(Debug, Clone)]
pub struct Sample {
    context: String,
    cores: Option<Vec<u32>>,
    rmid: Option<u64>,
    values: EventValues,
}

impl Sample {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            cores: None,
            rmid: None,
            values: EventValues::new(),
        }
    }

    /// Attach the core list a monitored process ran on (process mode).
    pub fn with_cores(mut self, cores: Vec<u32>) -> Self {
        self.cores = Some(cores);
        self
    }

    /// Attach the RMID association (legacy register backend, core mode).
    pub fn with_rmid(mut self, rmid: u64) -> Self {
        self.rmid = Some(rmid);
        self
    }

    /// Record a measured value, builder style.
    pub fn with_value(mut self, kind: EventKind, value: f64) -> Self {
        self.values.set(kind, value);
        self
    }

    /// Record a measured value.
    pub fn set_value(&mut self, kind: EventKind, value: f64) {
        self.values.set(kind, value);
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Core list from the upstream lookup; `None` when the lookup failed.
    pub fn cores(&self) -> Option<&[u32]> {
        self.cores.as_deref()
    }

    /// RMID from the upstream association lookup; `None` when it failed.
    pub fn rmid(&self) -> Option<u64> {
        self.rmid
    }

    /// The measured value for `kind`, if it was collected this interval.
    pub fn value(&self, kind: EventKind) -> Option<f64> {
        self.values.get(kind)
    }

    /// The set of kinds measured this interval.
    pub fn measured(&self) -> EventSet {
        self.values.measured()
    }
}

/// Byte cap for the rendered core-list text, `err` fallback included.
pub const CORE_LIST_CAPACITY: usize = 16;

/// Render the core list a process ran on as comma-joined core ids.
///
/// A failed upstream lookup (`None`) renders as the literal `err`. The
/// result is truncated to [`CORE_LIST_CAPACITY`] bytes when the supplied
/// list is longer than the report column allows.
pub fn core_list_text(cores: Option<&[u32]>) -> String {
    let mut text = match cores {
        Some(cores) => cores
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(","),
        None => String::from("err"),
    };
    text.truncate(CORE_LIST_CAPACITY);
    text
}
