//! CSV report rendering
//!
//! Renders telemetry samples into a line-oriented CSV table: one header line
//! describing the active columns, then one data line per monitored entity
//! per sampling interval.
//!
//! Column layout is driven by the enabled [`EventSet`] and the report mode:
//! identity columns come first (`Time,Core`, `Time,PID,Core`, or
//! `Time,Socket`), then one column per enabled event in a fixed order. A
//! row distinguishes three cases per column:
//!
//! - measured this interval: the formatted value
//! - enabled but not measured: an empty field (two adjacent commas)
//! - not enabled: no field at all, matching its absence from the header
//!
//! Identity fields are always double-quoted; numeric fields never are. Each
//! render call is pure in its inputs and performs a single write per line,
//! so a write failure cannot leave interleaved partial lines.

use crate::monitor::{core_list_text, EventKind, EventSet, LlcFormat, MonitoringMode, Sample};
use crate::Result;
use std::fmt::Write as _;
use std::io::{IsTerminal, Write};

/// Capacity reserved for one row's column fragments.
///
/// Sized for the worst case of every column enabled plus the RMID column;
/// the builder grows safely beyond it, and the bound itself is asserted by
/// `test_worst_case_row_fits_column_buffer`.
pub const COLUMN_BUF_CAPACITY: usize = 128;

/// One data column: event kind plus its numeric presentation.
struct ColumnSpec {
    kind: EventKind,
    decimals: usize,
}

/// Data columns in display order. Must stay in sync with the header labels
/// written by [`CsvReport::begin`].
const COLUMNS: [ColumnSpec; 11] = [
    ColumnSpec { kind: EventKind::Ipc, decimals: 2 },
    ColumnSpec { kind: EventKind::LlcMiss, decimals: 0 },
    ColumnSpec { kind: EventKind::LlcRef, decimals: 0 },
    ColumnSpec { kind: EventKind::LlcOccup, decimals: 1 },
    ColumnSpec { kind: EventKind::Mbl, decimals: 1 },
    ColumnSpec { kind: EventKind::Mbr, decimals: 1 },
    ColumnSpec { kind: EventKind::Mbt, decimals: 1 },
    ColumnSpec { kind: EventKind::LlcMissRead, decimals: 0 },
    ColumnSpec { kind: EventKind::LlcMissWrite, decimals: 0 },
    ColumnSpec { kind: EventKind::LlcRefRead, decimals: 0 },
    ColumnSpec { kind: EventKind::LlcRefWrite, decimals: 0 },
];

/// CSV renderer for one report session.
///
/// Holds an immutable snapshot of the report configuration, so the header
/// written by [`begin`](Self::begin) and the placeholder logic applied by
/// [`row`](Self::row) always agree for the lifetime of the report.
#[derive(Debug, Clone)]
pub struct CsvReport {
    events: EventSet,
    mode: MonitoringMode,
    llc_format: LlcFormat,
    rmid_column: bool,
}

impl CsvReport {
    /// Create a renderer for the given report configuration.
    ///
    /// `rmid_column` is the legacy register capability resolved at startup;
    /// it only takes effect in core mode.
    pub fn new(
        events: EventSet,
        mode: MonitoringMode,
        llc_format: LlcFormat,
        rmid_column: bool,
    ) -> Self {
        Self {
            events,
            mode,
            llc_format,
            rmid_column,
        }
    }

    /// The RMID column applies to core-mode reports only.
    fn rmid_active(&self) -> bool {
        self.rmid_column && self.mode == MonitoringMode::Core
    }

    /// Write the header line: identity columns, then one label per enabled
    /// event in display order.
    pub fn begin<W: Write>(&self, w: &mut W) -> Result<()> {
        let mut line = String::with_capacity(192);

        match self.mode {
            MonitoringMode::Core => {
                line.push_str("Time,Core");
                if self.rmid_active() {
                    line.push_str(",RMID");
                }
            }
            MonitoringMode::Process => line.push_str("Time,PID,Core"),
            MonitoringMode::Uncore => line.push_str("Time,Socket"),
        }

        if self.events.contains(EventSet::IPC) {
            line.push_str(",IPC");
        }
        if self.events.contains(EventSet::LLC_MISS) {
            line.push_str(",LLC Misses");
        }
        if self.events.contains(EventSet::LLC_REF) {
            line.push_str(",LLC References");
        }
        if self.events.contains(EventSet::LLC_OCCUP) {
            match self.llc_format {
                LlcFormat::Kilobytes => line.push_str(",LLC[KB]"),
                LlcFormat::Percent => line.push_str(",LLC[%]"),
            }
        }
        if self.events.contains(EventSet::MBL) {
            line.push_str(",MBL[MB/s]");
        }
        if self.events.contains(EventSet::MBR) {
            line.push_str(",MBR[MB/s]");
        }
        if self.events.contains(EventSet::MBT) {
            line.push_str(",MBT[MB/s]");
        }

        // PCIe labels keep the native tool's 11-character field width
        if self.events.contains(EventSet::LLC_MISS_READ) {
            let _ = write!(line, ",{:>11}", "LLC Misses Read");
        }
        if self.events.contains(EventSet::LLC_MISS_WRITE) {
            let _ = write!(line, ",{:>11}", "LLC Misses Write");
        }
        if self.events.contains(EventSet::LLC_REF_READ) {
            let _ = write!(line, ",{:>11}", "LLC References Read");
        }
        if self.events.contains(EventSet::LLC_REF_WRITE) {
            let _ = write!(line, ",{:>11}", "LLC References Write");
        }

        line.push('\n');
        w.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Per-interval pre-hook. The CSV layout has no per-interval framing,
    /// so this is a no-op; it exists so a sampling loop can drive every
    /// report format through the same interval cycle.
    pub fn interval_header<W: Write>(&self, _w: &mut W, _timestamp: &str) -> Result<()> {
        Ok(())
    }

    /// Per-interval post-hook counterpart of
    /// [`interval_header`](Self::interval_header). No-op.
    pub fn interval_footer<W: Write>(&self, _w: &mut W) -> Result<()> {
        Ok(())
    }

    /// Write one data line for `sample`.
    ///
    /// The identity prefix follows the report mode; in process mode the
    /// third field is the core list, or the literal `err` when the upstream
    /// lookup failed. Value columns follow the header's column set, with an
    /// empty field for each enabled-but-unmeasured kind.
    pub fn row<W: Write>(&self, w: &mut W, timestamp: &str, sample: &Sample) -> Result<()> {
        let data = self.row_data(sample);

        let line = match self.mode {
            MonitoringMode::Core | MonitoringMode::Uncore => {
                format!("{},\"{}\"{}\n", timestamp, sample.context(), data)
            }
            MonitoringMode::Process => {
                let core_list = core_list_text(sample.cores());
                format!(
                    "{},\"{}\",\"{}\"{}\n",
                    timestamp,
                    sample.context(),
                    core_list,
                    data
                )
            }
        };

        w.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Build the column fragments for one row.
    fn row_data(&self, sample: &Sample) -> String {
        let mut data = String::with_capacity(COLUMN_BUF_CAPACITY);

        if self.rmid_active() {
            push_column(&mut data, sample.rmid().map(|rmid| rmid as f64), 0, true);
        }

        for column in &COLUMNS {
            let column_present = self.events.contains(column.kind.flag());
            push_column(
                &mut data,
                sample.value(column.kind),
                column.decimals,
                column_present,
            );
        }

        data
    }

    /// End the report session. Appends two blank separator lines when the
    /// destination is an interactive terminal, nothing otherwise.
    pub fn end<W: Write + IsTerminal>(&self, w: &mut W) -> Result<()> {
        if w.is_terminal() {
            w.write_all(b"\n\n")?;
        }
        Ok(())
    }
}

/// Append one CSV column fragment to the row buffer.
///
/// A measured value renders as `,<value>`; an unmeasured value whose column
/// is enabled renders as a bare `,` so the field count stays aligned with
/// the header; a kind that is neither measured nor enabled adds nothing.
fn push_column(data: &mut String, value: Option<f64>, decimals: usize, column_present: bool) {
    match value {
        Some(value) => {
            let _ = write!(data, ",{:.*}", decimals, value);
        }
        None if column_present => data.push(','),
        None => {}
    }
}
