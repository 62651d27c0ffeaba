//! Report formatters: the JSON shape of every aggregator result.
//!
//! Sentinel results serialize as bare strings. Ranked and per-weekday results
//! serialize as JSON objects whose keys keep the ranking order.

use chrono::Timelike;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::aggregate::{CashbackReport, SpendingReport, WeekdayReport};
use crate::dates::{parse_timestamp, TIMESTAMP_FORMAT};
use crate::error::Result;

pub const NO_CASHBACK: &str = "no cashback this period";
pub const NO_SPENDING: &str = "no spending this period";

/// Pretty JSON (two-space indent); non-ASCII text is written as-is.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

impl Serialize for CashbackReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            CashbackReport::NoCashback => serializer.serialize_str(NO_CASHBACK),
            CashbackReport::Ranked(ranked) => {
                let mut map = serializer.serialize_map(Some(ranked.len()))?;
                for entry in ranked {
                    map.serialize_entry(&entry.category, &entry.cashback)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for SpendingReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SpendingReport::NoSpending => serializer.serialize_str(NO_SPENDING),
            SpendingReport::Spent(spending) => spending.serialize(serializer),
        }
    }
}

impl Serialize for WeekdayReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for day in &self.0 {
            map.serialize_entry(day.name(), &day.average)?;
        }
        map.end()
    }
}

/// Time-of-day greeting for the home report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Greeting {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Greeting::Morning,
            12..=17 => Greeting::Afternoon,
            18..=23 => Greeting::Evening,
            _ => Greeting::Night,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Greeting::Morning => "Good morning",
            Greeting::Afternoon => "Good afternoon",
            Greeting::Evening => "Good evening",
            Greeting::Night => "Good night",
        }
    }
}

impl Serialize for Greeting {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.text())
    }
}

/// Greeting for a canonical reference timestamp.
pub fn greeting(reference: &str) -> Result<Greeting> {
    let ts = parse_timestamp(reference, TIMESTAMP_FORMAT)?;
    Ok(Greeting::from_hour(ts.hour()))
}
