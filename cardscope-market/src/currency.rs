//! Central-bank daily rates feed.
//!
//! Body shape: `{"Date": "...", "Valute": {"USD": {"Value": 73.5, ...}, ...}}`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Feed, MarketError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyRate {
    pub currency: String,
    pub rate: f64,
}

#[derive(Deserialize)]
struct DailyRates {
    #[serde(rename = "Valute")]
    valute: BTreeMap<String, Quote>,
}

#[derive(Deserialize)]
struct Quote {
    #[serde(rename = "Value")]
    value: f64,
}

/// Rates for `wanted` codes in that order; codes the feed lacks are skipped.
/// An empty `wanted` returns every rate, ordered by code.
pub fn parse_currency_rates(body: &str, wanted: &[String]) -> Result<Vec<CurrencyRate>> {
    let daily: DailyRates = serde_json::from_str(body).map_err(|source| MarketError::Decode {
        feed: Feed::Currency,
        source,
    })?;

    let rate = |code: &str, quote: &Quote| CurrencyRate {
        currency: code.to_string(),
        rate: quote.value,
    };

    if wanted.is_empty() {
        return Ok(daily.valute.iter().map(|(code, q)| rate(code, q)).collect());
    }

    let mut out = Vec::with_capacity(wanted.len());
    for code in wanted {
        let code = code.trim().to_ascii_uppercase();
        match daily.valute.get(&code) {
            Some(q) => out.push(rate(&code, q)),
            None => tracing::warn!(%code, "currency not present in rates feed"),
        }
    }
    Ok(out)
}
