//! Transaction record as produced by the statement readers.

use serde::{Deserialize, Serialize};

/// Characters banks use to hide card digits.
const MASK_CHARS: &[char] = &['*', '•', 'x', 'X', '#'];

/// One card operation from a bank statement.
///
/// Records are immutable once ingested: every pipeline stage borrows them and
/// builds new collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Operation timestamp, `DD.MM.YYYY HH:MM:SS`
    pub operation_date: String,
    /// Payment day, `DD.MM.YYYY`
    pub payment_date: Option<String>,
    /// Card identifier. `None` when missing or when the source cell was not text.
    pub card_number: Option<String>,
    pub status: Option<String>,
    /// Negative = debit, positive = credit
    pub operation_amount: f64,
    pub operation_currency: Option<String>,
    pub payment_amount: f64,
    /// May be absent or NaN in raw exports
    pub cashback: Option<f64>,
    pub category: Option<String>,
    pub mcc: Option<String>,
    pub description: String,
    /// Operation amount after round-up to the savings jar
    pub rounded_amount: f64,
}

impl Transaction {
    pub fn new(operation_date: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            operation_date: operation_date.into(),
            payment_date: None,
            card_number: None,
            status: None,
            operation_amount: 0.0,
            operation_currency: None,
            payment_amount: 0.0,
            cashback: None,
            category: None,
            mcc: None,
            description: description.into(),
            rounded_amount: 0.0,
        }
    }

    pub fn with_payment_date(mut self, date: impl Into<String>) -> Self {
        self.payment_date = Some(date.into());
        self
    }

    pub fn with_card(mut self, card: impl Into<String>) -> Self {
        self.card_number = Some(card.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_operation_amount(mut self, amount: f64) -> Self {
        self.operation_amount = amount;
        self
    }

    pub fn with_payment_amount(mut self, amount: f64) -> Self {
        self.payment_amount = amount;
        self
    }

    pub fn with_rounded_amount(mut self, amount: f64) -> Self {
        self.rounded_amount = amount;
        self
    }

    pub fn with_cashback(mut self, cashback: f64) -> Self {
        self.cashback = Some(cashback);
        self
    }

    /// Card identifier with masking characters removed.
    ///
    /// `None` for records that must not take part in per-card aggregation.
    pub fn card_key(&self) -> Option<String> {
        let raw = self.card_number.as_deref()?;
        let key: String = raw
            .chars()
            .filter(|c| !MASK_CHARS.contains(c) && !c.is_whitespace())
            .collect();
        if key.is_empty() { None } else { Some(key) }
    }

    /// Cashback usable for aggregation (present and not NaN).
    pub fn valid_cashback(&self) -> Option<f64> {
        self.cashback.filter(|c| !c.is_nan())
    }

    /// Trimmed category, `None` when blank.
    pub fn category_key(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    /// Returns true if this is a debit (negative amount)
    pub fn is_expense(&self) -> bool {
        self.operation_amount < 0.0
    }
}
