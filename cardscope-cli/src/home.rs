//! Month-to-date overview: greeting, per-card totals, largest payments and
//! market snapshot.

use cardscope_core::{
    by_exact_range, card_summaries, greeting, top_transactions, CardSummary, Greeting,
    TopTransaction, Transaction, TOP_K,
};
use cardscope_market::{CurrencyRate, MarketClient, StockPrice};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomeReport {
    pub greeting: Greeting,
    pub cards: Vec<CardSummary>,
    pub top_transactions: Vec<TopTransaction>,
    pub currency_rates: Vec<CurrencyRate>,
    pub stock_prices: Vec<StockPrice>,
}

impl HomeReport {
    /// Statement half of the report. `reference` is canonical; market lists
    /// stay empty until [`HomeReport::enrich`].
    pub fn from_statement(
        records: &[Transaction],
        reference: &str,
    ) -> cardscope_core::Result<Self> {
        let month = by_exact_range(reference, records)?;
        tracing::debug!(reference, in_month = month.len(), "building home report");

        Ok(Self {
            greeting: greeting(reference)?,
            cards: card_summaries(month.iter().copied()),
            top_transactions: top_transactions(month.iter().copied(), TOP_K),
            currency_rates: Vec::new(),
            stock_prices: Vec::new(),
        })
    }

    /// Fill the market lists. A failed feed is logged and left empty.
    pub async fn enrich(&mut self, client: &MarketClient) {
        self.currency_rates = match client.currency_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                tracing::warn!(error = %e, "skipping currency rates");
                Vec::new()
            }
        };
        self.stock_prices = match client.stock_prices().await {
            Ok(prices) => prices,
            Err(e) => {
                tracing::warn!(error = %e, "skipping stock prices");
                Vec::new()
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardscope_market::MarketConfig;

    fn statement() -> Vec<Transaction> {
        vec![
            Transaction::new("01.12.2021 10:00:00", "Пятёрочка")
                .with_card("*7197")
                .with_category("Супермаркеты")
                .with_payment_amount(-160.89)
                .with_rounded_amount(160.89),
            Transaction::new("15.12.2021 09:30:00", "Яндекс Такси")
                .with_card("*7197")
                .with_category("Такси")
                .with_payment_amount(-1000.0)
                .with_rounded_amount(1000.0),
            Transaction::new("20.12.2021 21:00:00", "Перевод")
                .with_card("*5091")
                .with_payment_amount(-5000.0)
                .with_rounded_amount(5000.0),
            Transaction::new("30.11.2021 12:00:00", "Last month")
                .with_card("*7197")
                .with_payment_amount(-99999.0)
                .with_rounded_amount(99999.0),
        ]
    }

    #[test]
    fn test_from_statement() {
        let txns = statement();
        let report = HomeReport::from_statement(&txns, "20.12.2021 22:00:00").unwrap();

        assert_eq!(report.greeting, Greeting::Evening);
        let digits: Vec<_> = report.cards.iter().map(|c| c.last_digits.as_str()).collect();
        assert_eq!(digits, vec!["7197", "5091"]);
        assert_eq!(report.cards[0].total_spent, 1160.89);
        assert_eq!(report.cards[0].cashback, 11.61);

        let amounts: Vec<_> = report.top_transactions.iter().map(|t| t.amount).collect();
        assert_eq!(amounts, vec![5000.0, 1000.0, 160.89]);
        assert!(report.currency_rates.is_empty());
        assert!(report.stock_prices.is_empty());
    }

    #[test]
    fn test_from_statement_rejects_bad_reference() {
        let txns = statement();
        assert!(HomeReport::from_statement(&txns, "2021-12-20").is_err());
    }

    #[test]
    fn test_json_shape() {
        let txns = statement();
        let report = HomeReport::from_statement(&txns, "02.12.2021 08:00:00").unwrap();
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["greeting"], "Good morning");
        assert_eq!(value["cards"][0]["last_digits"], "7197");
        assert_eq!(value["top_transactions"][0]["date"], "01.12.2021");
        assert_eq!(value["currency_rates"], serde_json::json!([]));
        assert_eq!(value["stock_prices"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_enrich_failure_leaves_lists_empty() {
        let txns = statement();
        let mut report = HomeReport::from_statement(&txns, "20.12.2021 22:00:00").unwrap();
        let client = MarketClient::new(MarketConfig {
            currency_url: "http://127.0.0.1:9/daily_json.js".to_string(),
            api_key: None,
            ..MarketConfig::default()
        });

        report.enrich(&client).await;
        assert!(report.currency_rates.is_empty());
        assert!(report.stock_prices.is_empty());
        assert_eq!(report.cards.len(), 2);
    }
}
