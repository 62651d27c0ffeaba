//! Equity quote feed. Body: `[{"symbol": "AAPL", "price": 225.91, ...}, ...]`.

use serde::{Deserialize, Serialize};

use crate::error::{Feed, MarketError, Result};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockPrice {
    pub stock: String,
    pub price: f64,
}

#[derive(Deserialize)]
struct Quote {
    symbol: String,
    price: Option<f64>,
}

/// Quotes in feed order. Quotes without a price are dropped.
pub fn parse_stock_prices(body: &str) -> Result<Vec<StockPrice>> {
    let quotes: Vec<Quote> = serde_json::from_str(body).map_err(|source| MarketError::Decode {
        feed: Feed::Stocks,
        source,
    })?;

    Ok(quotes
        .into_iter()
        .filter_map(|q| {
            q.price.map(|price| StockPrice {
                stock: q.symbol,
                price,
            })
        })
        .collect())
}
