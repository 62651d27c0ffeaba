//! Aggregators: fold filtered records into per-card, per-category and
//! per-weekday summaries.
//!
//! Grouped outputs never depend on hash iteration order. Groups keep the
//! order in which their key was first seen, and ranked outputs use a stable
//! sort so equal values stay in that order.

use std::collections::HashMap;

use chrono::{Datelike, Local, NaiveDateTime, Weekday};
use serde::Serialize;

use crate::dates::{
    months_before, operation_time, parse_timestamp, REPORT_DAY_FORMAT, TIMESTAMP_FORMAT,
};
use crate::error::Result;
use crate::filters::{by_category, by_rolling_window_at};
use crate::record::Transaction;

/// Number of entries in the top-transactions report.
pub const TOP_K: usize = 5;

/// Length of the trailing window used by category and weekday reports.
pub const SPENDING_WINDOW_MONTHS: u32 = 3;

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// One percent of `amount`, rounded to cents. Zero amounts earn nothing.
pub fn calculate_cashback(amount: f64) -> f64 {
    if amount == 0.0 {
        return 0.0;
    }
    round_to(amount / 100.0, 2)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardSummary {
    pub last_digits: String,
    pub total_spent: f64,
    pub cashback: f64,
}

/// Spend and cashback per card, in the order cards first appear.
///
/// Records without a usable card identifier are skipped.
pub fn card_summaries<'a, I>(records: I) -> Vec<CardSummary>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut cards: Vec<CardSummary> = Vec::new();

    for txn in records {
        let Some(key) = txn.card_key() else {
            continue;
        };
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            cards.push(CardSummary {
                last_digits: key,
                total_spent: 0.0,
                cashback: 0.0,
            });
            cards.len() - 1
        });
        let card = &mut cards[slot];
        card.total_spent += txn.rounded_amount;
        card.cashback += calculate_cashback(txn.rounded_amount);
    }

    for card in &mut cards {
        card.total_spent = round_to(card.total_spent, 2);
        card.cashback = round_to(card.cashback, 2);
    }
    tracing::debug!(cards = cards.len(), "summarized cards");
    cards
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopTransaction {
    pub date: String,
    pub amount: f64,
    pub category: Option<String>,
    pub description: String,
}

/// The `k` records with the largest absolute payment amount.
///
/// Records with equal amounts keep their input order.
pub fn top_transactions<'a, I>(records: I, k: usize) -> Vec<TopTransaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut ranked: Vec<&Transaction> = records.into_iter().collect();
    ranked.sort_by(|a, b| b.payment_amount.abs().total_cmp(&a.payment_amount.abs()));

    ranked
        .into_iter()
        .take(k)
        .map(|txn| TopTransaction {
            date: txn.operation_date.chars().take(10).collect(),
            amount: txn.rounded_amount,
            category: txn.category.clone(),
            description: txn.description.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCashback {
    pub category: String,
    pub cashback: i64,
}

/// Cashback ranking, or the "nothing earned" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum CashbackReport {
    Ranked(Vec<CategoryCashback>),
    NoCashback,
}

/// Whole-unit cashback per category, highest first.
pub fn cashback_by_category<'a, I>(records: I) -> CashbackReport
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut ranked: Vec<CategoryCashback> = Vec::new();

    for txn in records {
        let (Some(cashback), Some(category)) = (txn.valid_cashback(), txn.category_key()) else {
            continue;
        };
        let slot = *index.entry(category.to_string()).or_insert_with(|| {
            ranked.push(CategoryCashback {
                category: category.to_string(),
                cashback: 0,
            });
            ranked.len() - 1
        });
        ranked[slot].cashback += cashback.round_ties_even() as i64;
    }

    if ranked.is_empty() {
        return CashbackReport::NoCashback;
    }
    ranked.sort_by(|a, b| b.cashback.cmp(&a.cashback));
    CashbackReport::Ranked(ranked)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpending {
    pub category: String,
    pub total: f64,
    pub window_start: String,
    pub window_end: String,
}

/// Category spend over the trailing window, or the "no spending" sentinel.
#[derive(Debug, Clone, PartialEq)]
pub enum SpendingReport {
    Spent(CategorySpending),
    NoSpending,
}

/// Signed spend in `category` over the three months ending at `reference`
/// (canonical format). `None` means now.
pub fn spending_by_category<'a, I>(
    records: I,
    category: &str,
    reference: Option<&str>,
) -> Result<SpendingReport>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let reference = match reference {
        Some(date) => parse_timestamp(date, TIMESTAMP_FORMAT)?,
        None => Local::now().naive_local(),
    };
    spending_by_category_at(records, category, reference)
}

pub fn spending_by_category_at<'a, I>(
    records: I,
    category: &str,
    reference: NaiveDateTime,
) -> Result<SpendingReport>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let in_category = by_category(category, records);
    let in_window = by_rolling_window_at(reference, SPENDING_WINDOW_MONTHS, in_category)?;

    let total = round_to(in_window.iter().map(|t| t.operation_amount).sum(), 2);
    if total == 0.0 {
        return Ok(SpendingReport::NoSpending);
    }

    let start = months_before(reference, SPENDING_WINDOW_MONTHS)?;
    Ok(SpendingReport::Spent(CategorySpending {
        category: category.trim().to_string(),
        total,
        window_start: start.format(REPORT_DAY_FORMAT).to_string(),
        window_end: reference.format(REPORT_DAY_FORMAT).to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekdayAverage {
    pub weekday: Weekday,
    pub average: f64,
}

impl WeekdayAverage {
    pub fn name(&self) -> &'static str {
        weekday_name(self.weekday)
    }
}

/// Average absolute spend per weekday, Monday first. Weekdays without
/// records are absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeekdayReport(pub Vec<WeekdayAverage>);

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

pub fn spending_by_weekday<'a, I>(records: I, reference: Option<&str>) -> Result<WeekdayReport>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let reference = match reference {
        Some(date) => parse_timestamp(date, TIMESTAMP_FORMAT)?,
        None => Local::now().naive_local(),
    };
    spending_by_weekday_at(records, reference)
}

pub fn spending_by_weekday_at<'a, I>(records: I, reference: NaiveDateTime) -> Result<WeekdayReport>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let in_window = by_rolling_window_at(reference, SPENDING_WINDOW_MONTHS, records)?;

    let mut sums = [0.0f64; 7];
    let mut counts = [0usize; 7];
    for txn in in_window {
        let day = operation_time(txn)?.weekday().num_days_from_monday() as usize;
        sums[day] += txn.operation_amount.abs();
        counts[day] += 1;
    }

    let mut days = Vec::new();
    let mut weekday = Weekday::Mon;
    for (sum, count) in sums.iter().zip(counts) {
        if count > 0 {
            days.push(WeekdayAverage {
                weekday,
                average: round_to(sum / count as f64, 2),
            });
        }
        weekday = weekday.succ();
    }
    Ok(WeekdayReport(days))
}
