//! Sample-record replay
//!
//! Counter acquisition lives outside this tool. The binary consumes
//! pre-collected telemetry as JSON lines, one sampling interval per line:
//!
//! ```json
//! {"time": "2024-01-01 00:00:00", "samples": [
//!     {"entity": "0", "values": {"ipc": 1.23, "llc-occup": 2048.0}}
//! ]}
//! ```
//!
//! `time` is optional (the current wall clock is stamped when absent), as
//! are `cores` (process mode) and `rmid` (legacy register backend). Value
//! keys are the canonical kebab-case event names from
//! [`EventKind`](super::EventKind).

use super::{EventKind, Sample};
use serde::Deserialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// One sampling interval: a timestamp plus one record per monitored entity.
#[derive(Debug, Clone, Deserialize)]
pub struct IntervalRecord {
    /// Pre-formatted timestamp for every row of this interval.
    #[serde(default)]
    pub time: Option<String>,
    pub samples: Vec<SampleRecord>,
}

/// One entity's measurements within an interval.
#[derive(Debug, Clone, Deserialize)]
pub struct SampleRecord {
    /// Entity identity: core id, PID, or socket id, matching the report mode.
    pub entity: String,
    /// Cores the process ran on; omit when the lookup failed upstream.
    #[serde(default)]
    pub cores: Option<Vec<u32>>,
    /// RMID association; omit when the lookup failed upstream.
    #[serde(default)]
    pub rmid: Option<u64>,
    /// Measured values keyed by event name.
    #[serde(default)]
    pub values: BTreeMap<EventKind, f64>,
}

impl SampleRecord {
    /// Convert into the renderer's sample form.
    pub fn into_sample(self) -> Sample {
        let mut sample = Sample::new(self.entity);
        if let Some(cores) = self.cores {
            sample = sample.with_cores(cores);
        }
        if let Some(rmid) = self.rmid {
            sample = sample.with_rmid(rmid);
        }
        for (kind, value) in self.values {
            sample.set_value(kind, value);
        }
        sample
    }
}

/// Sample-record parse failure, tagged with its input line.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("line {line}: invalid sample record: {source}")]
    Parse {
        line: usize,
        source: serde_json::Error,
    },
}

/// Parse one JSON-lines interval record. `line` is 1-based and is only used
/// for error reporting.
pub fn parse_interval(line: usize, text: &str) -> Result<IntervalRecord, RecordError> {
    serde_json::from_str(text).map_err(|source| RecordError::Parse { line, source })
}
