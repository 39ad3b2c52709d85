//! Cache-busting timestamps
//!
//! Every request carries a `cache=<timestamp>` query parameter so CDN caches in
//! front of the rendering service never serve a stale render. The format is
//! RFC 3339 with second precision, e.g. `2024-11-20T09:15:00+01:00`, or
//! `2024-11-20T08:15:00Z` when the local offset is zero.

use std::fmt;

use chrono::{DateTime, Local, Offset, TimeZone};

/// Timestamp for the current local time
pub fn cache_timestamp() -> String {
    format_cache_timestamp(&Local::now())
}

/// Format a date-time as `yyyy-MM-ddTHH:mm:ss±HH:MM` (or `Z` for a zero offset)
pub fn format_cache_timestamp<Tz: TimeZone>(dt: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    let base = dt.format("%Y-%m-%dT%H:%M:%S");

    if dt.offset().fix().local_minus_utc() == 0 {
        format!("{}Z", base)
    } else {
        format!("{}{}", base, dt.format("%:z"))
    }
}
