//! cardscope-market: currency-rate and equity-price feeds used to enrich reports.

pub mod client;
pub mod currency;
pub mod error;
pub mod stocks;

pub use client::{ensure_success, MarketClient, MarketConfig};
pub use currency::{parse_currency_rates, CurrencyRate};
pub use error::{Feed, MarketError, Result};
pub use stocks::{parse_stock_prices, StockPrice};
