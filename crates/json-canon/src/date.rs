//! ISO-8601 rendering for date leaves, matching `Date.prototype.toISOString`.

use chrono::{DateTime, Datelike, Timelike, Utc};

/// Render `date` as `YYYY-MM-DDTHH:mm:ss.sssZ`.
///
/// Sub-millisecond precision is truncated. Years outside `0000..=9999` use
/// the expanded six-digit signed form (`+010000`, `-000001`).
pub fn to_iso_string(date: &DateTime<Utc>) -> String {
    let year = date.year();
    let year = if (0..=9999).contains(&year) {
        format!("{year:04}")
    } else if year < 0 {
        format!("-{:06}", year.unsigned_abs())
    } else {
        format!("+{year:06}")
    };
    format!(
        "{year}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second(),
        // A leap second is reported as nanosecond >= 1e9; clamp like JS does.
        (date.nanosecond() / 1_000_000).min(999),
    )
}
