//! Temporal filters over transaction records.
//!
//! Every filter borrows its input and returns the matching records in their
//! input order. A reference date or record timestamp that fails to parse
//! fails the whole call; records are never dropped silently.

use chrono::{Datelike, NaiveDateTime};

use crate::dates::{month_start, months_before, operation_time, parse_timestamp, TIMESTAMP_FORMAT};
use crate::error::Result;
use crate::record::Transaction;

/// Records from the first day of the reference month up to the reference moment.
pub fn by_exact_range<'a, I>(reference_date: &str, records: I) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let reference = parse_timestamp(reference_date, TIMESTAMP_FORMAT)?;
    by_exact_range_at(reference, records)
}

pub fn by_exact_range_at<'a, I>(reference: NaiveDateTime, records: I) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    between(month_start(reference), reference, records)
}

/// Records whose operation falls in the given calendar year and month.
///
/// An impossible month simply matches nothing.
pub fn by_year_month<'a, I>(year: i32, month: u32, records: I) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = Vec::new();
    for txn in records {
        let ts = operation_time(txn)?;
        if ts.year() == year && ts.month() == month {
            out.push(txn);
        }
    }
    tracing::debug!(year, month, matched = out.len(), "filtered by year/month");
    Ok(out)
}

/// Records in `[reference - months_back months, reference]`.
pub fn by_rolling_window<'a, I>(
    reference_date: &str,
    months_back: u32,
    records: I,
) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let reference = parse_timestamp(reference_date, TIMESTAMP_FORMAT)?;
    by_rolling_window_at(reference, months_back, records)
}

pub fn by_rolling_window_at<'a, I>(
    reference: NaiveDateTime,
    months_back: u32,
    records: I,
) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let start = months_before(reference, months_back)?;
    between(start, reference, records)
}

/// Records whose trimmed category equals `category` (also trimmed).
pub fn by_category<'a, I>(category: &str, records: I) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let wanted = category.trim();
    records
        .into_iter()
        .filter(|txn| txn.category_key() == Some(wanted))
        .collect()
}

/// Inclusive on both ends.
fn between<'a, I>(lower: NaiveDateTime, upper: NaiveDateTime, records: I) -> Result<Vec<&'a Transaction>>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut out = Vec::new();
    for txn in records {
        let ts = operation_time(txn)?;
        if lower <= ts && ts <= upper {
            out.push(txn);
        }
    }
    tracing::debug!(%lower, %upper, matched = out.len(), "filtered by date range");
    Ok(out)
}
