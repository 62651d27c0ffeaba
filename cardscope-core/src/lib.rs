//! cardscope-core: transaction record model and the date-window analysis pipeline.
//!
//! Stages, leaf-first: [`record`] → [`dates`] → [`filters`] → [`aggregate`] → [`report`].

pub mod aggregate;
pub mod dates;
pub mod error;
pub mod filters;
pub mod record;
pub mod report;

pub use aggregate::{
    calculate_cashback, card_summaries, cashback_by_category, round_to, spending_by_category,
    spending_by_category_at, spending_by_weekday, spending_by_weekday_at, top_transactions,
    CardSummary, CashbackReport, CategoryCashback, CategorySpending, SpendingReport,
    TopTransaction, WeekdayAverage, WeekdayReport, SPENDING_WINDOW_MONTHS, TOP_K,
};
pub use dates::{
    format_timestamp, month_start, months_before, normalize_reference, now_in_timezone,
    operation_time, parse_timestamp, ISO_TIMESTAMP_FORMAT, TIMESTAMP_FORMAT,
};
pub use error::{CoreError, Result};
pub use filters::{
    by_category, by_exact_range, by_exact_range_at, by_rolling_window, by_rolling_window_at,
    by_year_month,
};
pub use record::Transaction;
pub use report::{greeting, to_json, Greeting, NO_CASHBACK, NO_SPENDING};
