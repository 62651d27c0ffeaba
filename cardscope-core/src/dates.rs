//! Date utilities: parsing statement timestamps and calendar-month arithmetic.

use chrono::{Datelike, Days, Months, NaiveDateTime, Utc};
use chrono_tz::Tz;

use crate::error::{CoreError, Result};
use crate::record::Transaction;

/// Canonical timestamp format of records and reference dates.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";
/// Alternate form some call sites produce; normalized at the boundary.
pub const ISO_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
/// Payment-day format.
pub const DAY_FORMAT: &str = "%d.%m.%Y";
/// Format of window bounds in reports.
pub const REPORT_DAY_FORMAT: &str = "%Y-%m-%d";

/// Forms accepted by [`normalize_reference`], tried in order.
const REFERENCE_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%d.%m.%Y %H:%M",
    ISO_TIMESTAMP_FORMAT,
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse `s` with `format`, failing with [`CoreError::InvalidDate`] on mismatch.
pub fn parse_timestamp(s: &str, format: &'static str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), format).map_err(|_| CoreError::invalid_date(s, format))
}

/// Parsed operation timestamp of a record.
pub fn operation_time(txn: &Transaction) -> Result<NaiveDateTime> {
    parse_timestamp(&txn.operation_date, TIMESTAMP_FORMAT)
}

/// Render a timestamp in the canonical record format.
pub fn format_timestamp(dt: NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// First day of the month of `date`, keeping the time of day.
pub fn month_start(date: NaiveDateTime) -> NaiveDateTime {
    date - Days::new(u64::from(date.day0()))
}

/// Move `date` back by `n` calendar months.
///
/// The day of month is clamped to the length of the target month, so
/// 31 March minus one month is 28 (or 29) February.
pub fn months_before(date: NaiveDateTime, n: u32) -> Result<NaiveDateTime> {
    date.checked_sub_months(Months::new(n))
        .ok_or_else(|| CoreError::DateOutOfRange {
            date: format_timestamp(date),
            months: n,
        })
}

/// Accept either `DD.MM.YYYY HH:MM[:SS]` or `YYYY-MM-DD HH:MM[:SS]` and return
/// the canonical `DD.MM.YYYY HH:MM:SS` form.
pub fn normalize_reference(s: &str) -> Result<String> {
    let trimmed = s.trim();
    REFERENCE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(format_timestamp)
        .ok_or_else(|| CoreError::invalid_date(s, TIMESTAMP_FORMAT))
}

/// Wall-clock time in an IANA timezone such as "Europe/Moscow".
pub fn now_in_timezone(tz: &str) -> Result<NaiveDateTime> {
    let tz: Tz = tz
        .parse()
        .map_err(|_| CoreError::InvalidTimezone(tz.to_string()))?;
    Ok(Utc::now().with_timezone(&tz).naive_local())
}
