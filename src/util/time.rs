//! Wall-clock timestamp formatting
//!
//! Sample records usually arrive with a pre-formatted timestamp from the
//! collector; records without one are stamped here at render time.

use chrono::{DateTime, Local, TimeZone};

/// Timestamp layout used in report rows.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp in the report's row layout.
pub fn format_timestamp<Tz: TimeZone>(time: DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    time.format(TIMESTAMP_FORMAT).to_string()
}

/// The current wall clock in the report's row layout.
pub fn now_timestamp() -> String {
    format_timestamp(Local::now())
}
