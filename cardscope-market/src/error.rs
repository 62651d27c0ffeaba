use std::fmt;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

/// Which upstream feed a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Currency,
    Stocks,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Currency => f.write_str("currency rates"),
            Feed::Stocks => f.write_str("stock prices"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MarketError {
    /// The feed answered with a non-success status.
    #[error("{feed} feed unavailable: HTTP {status}")]
    UpstreamUnavailable {
        feed: Feed,
        status: reqwest::StatusCode,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("unexpected {feed} response: {source}")]
    Decode {
        feed: Feed,
        #[source]
        source: serde_json::Error,
    },

    #[error("missing API key for the stock price feed (set CARDSCOPE_STOCK_API_KEY)")]
    MissingApiKey,
}
