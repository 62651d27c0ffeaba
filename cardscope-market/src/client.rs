//! HTTP plumbing shared by the feeds. One request per call, no retries.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::currency::{parse_currency_rates, CurrencyRate};
use crate::error::{Feed, MarketError, Result};
use crate::stocks::{parse_stock_prices, StockPrice};

pub const DEFAULT_CURRENCY_URL: &str = "https://www.cbr-xml-daily.ru/daily_json.js";
pub const DEFAULT_STOCK_URL: &str = "https://financialmodelingprep.com/api/v3/quote";

/// Which rates and quotes to fetch, and from where.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// ISO codes, e.g. "USD". Empty means every currency the feed returns.
    pub currencies: Vec<String>,
    /// Ticker symbols, e.g. "AAPL".
    pub stocks: Vec<String>,
    pub currency_url: String,
    pub stock_url: String,
    pub api_key: Option<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            currencies: vec!["USD".to_string(), "EUR".to_string()],
            stocks: ["AAPL", "AMZN", "GOOGL", "MSFT", "TSLA"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            currency_url: DEFAULT_CURRENCY_URL.to_string(),
            stock_url: DEFAULT_STOCK_URL.to_string(),
            api_key: None,
        }
    }
}

/// Fail with [`MarketError::UpstreamUnavailable`] unless `status` is 2xx.
pub fn ensure_success(feed: Feed, status: StatusCode) -> Result<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(MarketError::UpstreamUnavailable { feed, status })
    }
}

pub struct MarketClient {
    http: reqwest::Client,
    config: MarketConfig,
}

impl MarketClient {
    pub fn new(config: MarketConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Today's rates for the configured currencies, in configured order.
    pub async fn currency_rates(&self) -> Result<Vec<CurrencyRate>> {
        let body = self
            .get_text(Feed::Currency, &self.config.currency_url, &[])
            .await?;
        parse_currency_rates(&body, &self.config.currencies)
    }

    /// Latest quotes for the configured tickers.
    pub async fn stock_prices(&self) -> Result<Vec<StockPrice>> {
        if self.config.stocks.is_empty() {
            return Ok(Vec::new());
        }
        let key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(MarketError::MissingApiKey)?;
        let url = format!(
            "{}/{}",
            self.config.stock_url.trim_end_matches('/'),
            self.config.stocks.join(",")
        );
        let body = self
            .get_text(Feed::Stocks, &url, &[("apikey", key)])
            .await?;
        parse_stock_prices(&body)
    }

    /// Transport errors drop the URL: its query carries the API key.
    async fn get_text(&self, feed: Feed, url: &str, query: &[(&str, &str)]) -> Result<String> {
        tracing::debug!(%feed, "requesting market data");
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        ensure_success(feed, resp.status())?;
        Ok(resp.text().await.map_err(reqwest::Error::without_url)?)
    }
}
