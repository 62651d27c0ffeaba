use anyhow::{bail, Result};

/// Bank export column headers.
pub mod headers {
    pub const OPERATION_DATE: &str = "Дата операции";
    pub const PAYMENT_DATE: &str = "Дата платежа";
    pub const CARD_NUMBER: &str = "Номер карты";
    pub const STATUS: &str = "Статус";
    pub const OPERATION_AMOUNT: &str = "Сумма операции";
    pub const OPERATION_CURRENCY: &str = "Валюта операции";
    pub const PAYMENT_AMOUNT: &str = "Сумма платежа";
    pub const CASHBACK: &str = "Кэшбэк";
    pub const CATEGORY: &str = "Категория";
    pub const MCC: &str = "MCC";
    pub const DESCRIPTION: &str = "Описание";
    pub const ROUNDED_AMOUNT: &str = "Сумма операции с округлением";
}

/// A spreadsheet cell, independent of the file format it came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    /// Blank text counts as empty.
    pub fn text(s: &str) -> Self {
        if s.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// Position of each known column in a statement's header row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnMap {
    pub operation_date: usize,
    pub payment_date: Option<usize>,
    pub card_number: Option<usize>,
    pub status: Option<usize>,
    pub operation_amount: Option<usize>,
    pub operation_currency: Option<usize>,
    pub payment_amount: Option<usize>,
    pub cashback: Option<usize>,
    pub category: Option<usize>,
    pub mcc: Option<usize>,
    pub description: Option<usize>,
    pub rounded_amount: Option<usize>,
}

impl ColumnMap {
    /// Locate columns by header name. Only the operation date is mandatory.
    pub fn from_headers<'h>(header_row: impl IntoIterator<Item = &'h str>) -> Result<Self> {
        let names: Vec<String> = header_row
            .into_iter()
            .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
            .collect();
        let find = |name: &str| names.iter().position(|h| h == name);

        let Some(operation_date) = find(headers::OPERATION_DATE) else {
            bail!("statement has no '{}' column", headers::OPERATION_DATE);
        };

        Ok(Self {
            operation_date,
            payment_date: find(headers::PAYMENT_DATE),
            card_number: find(headers::CARD_NUMBER),
            status: find(headers::STATUS),
            operation_amount: find(headers::OPERATION_AMOUNT),
            operation_currency: find(headers::OPERATION_CURRENCY),
            payment_amount: find(headers::PAYMENT_AMOUNT),
            cashback: find(headers::CASHBACK),
            category: find(headers::CATEGORY),
            mcc: find(headers::MCC),
            description: find(headers::DESCRIPTION),
            rounded_amount: find(headers::ROUNDED_AMOUNT),
        })
    }
}
