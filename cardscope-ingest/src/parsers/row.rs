//! Row mapping shared by the xlsx and CSV readers.
//!
//! Timestamps are rewritten to the canonical `DD.MM.YYYY HH:MM:SS` form when
//! they are recognisable; anything else is passed through verbatim so the
//! analysis pipeline can reject it.

use anyhow::{anyhow, Context, Result};
use cardscope_core::{dates::DAY_FORMAT, format_timestamp, normalize_reference, Transaction};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::types::{headers, Cell, ColumnMap};

static EMPTY: Cell = Cell::Empty;

/// Excel serial date to timestamp. Excel's epoch is 1899-12-30 (this absorbs
/// the 1900 leap-year bug).
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}

pub struct RowMapper {
    columns: ColumnMap,
    amount_junk: Regex,
}

impl RowMapper {
    pub fn new(columns: ColumnMap) -> Result<Self> {
        // currency signs, thousands separators (incl. NBSP), stray quotes
        let amount_junk = Regex::new(r"[^\d,.\-+eE]")?;
        Ok(Self {
            columns,
            amount_junk,
        })
    }

    /// Build a transaction from one data row. `line` is only used for error context.
    pub fn map(&self, row: &[Cell], line: usize) -> Result<Transaction> {
        let cols = &self.columns;
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or(&EMPTY);
        let amount = |idx: Option<usize>, column: &str| {
            self.amount(cell(idx))
                .with_context(|| format!("row {line}: bad '{column}' value"))
        };

        let operation_date = match cell(Some(cols.operation_date)) {
            Cell::Text(s) => normalize_reference(s).unwrap_or_else(|_| s.clone()),
            Cell::Number(serial) => excel_serial_to_datetime(*serial)
                .map(format_timestamp)
                .with_context(|| format!("row {line}: date serial {serial} out of range"))?,
            Cell::Empty => anyhow::bail!("row {line}: missing operation date"),
        };

        let payment_date = match cell(cols.payment_date) {
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Number(serial) => {
                excel_serial_to_datetime(*serial).map(|dt| dt.format(DAY_FORMAT).to_string())
            }
            Cell::Empty => None,
        };

        // A numeric card cell is not a card identifier.
        let card_number = match cell(cols.card_number) {
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Number(_) | Cell::Empty => None,
        };

        Ok(Transaction {
            operation_date,
            payment_date,
            card_number,
            status: self.text(cell(cols.status)),
            operation_amount: amount(cols.operation_amount, headers::OPERATION_AMOUNT)?
                .unwrap_or(0.0),
            operation_currency: self.text(cell(cols.operation_currency)),
            payment_amount: amount(cols.payment_amount, headers::PAYMENT_AMOUNT)?.unwrap_or(0.0),
            cashback: amount(cols.cashback, headers::CASHBACK)?,
            category: self.text(cell(cols.category)),
            mcc: match cell(cols.mcc) {
                Cell::Number(n) => Some(format!("{n:.0}")),
                other => self.text(other),
            },
            description: self.text(cell(cols.description)).unwrap_or_default(),
            rounded_amount: amount(cols.rounded_amount, headers::ROUNDED_AMOUNT)?.unwrap_or(0.0),
        })
    }

    fn text(&self, cell: &Cell) -> Option<String> {
        match cell {
            Cell::Text(s) => Some(s.trim().to_string()),
            Cell::Number(n) => Some(n.to_string()),
            Cell::Empty => None,
        }
    }

    /// Numeric value of a cell. Text accepts currency decoration ("1 234,56 ₽")
    /// and either decimal separator; text that is still not a number is an error.
    pub fn amount(&self, cell: &Cell) -> Result<Option<f64>> {
        match cell {
            Cell::Number(n) => Ok(Some(*n)),
            Cell::Text(s) => {
                let cleaned = self.amount_junk.replace_all(s, "");
                let value = decimal_point(&cleaned)
                    .parse()
                    .map_err(|_| anyhow!("not an amount: {s:?}"))?;
                Ok(Some(value))
            }
            Cell::Empty => Ok(None),
        }
    }
}

/// With both `,` and `.` present the last one is the decimal separator and
/// the other groups thousands. A lone `,` is a decimal comma.
fn decimal_point(s: &str) -> String {
    match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => s.replace(',', ""),
        _ => s.replace(',', "."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper() -> RowMapper {
        let columns = ColumnMap::from_headers([
            headers::OPERATION_DATE,
            headers::PAYMENT_DATE,
            headers::CARD_NUMBER,
            headers::OPERATION_AMOUNT,
            headers::PAYMENT_AMOUNT,
            headers::CASHBACK,
            headers::CATEGORY,
            headers::MCC,
            headers::DESCRIPTION,
            headers::ROUNDED_AMOUNT,
        ])
        .unwrap();
        RowMapper::new(columns).unwrap()
    }

    fn text(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn test_excel_serial_to_datetime() {
        let dt = excel_serial_to_datetime(44561.697222222225).unwrap();
        assert_eq!(format_timestamp(dt), "31.12.2021 16:44:00");
        let day = excel_serial_to_datetime(44550.0).unwrap();
        assert_eq!(format_timestamp(day), "20.12.2021 00:00:00");
    }

    #[test]
    fn test_map_text_row() {
        let row = vec![
            text("31.12.2021 16:44:00"),
            text("31.12.2021"),
            text("*7197"),
            text("-160,89"),
            text("-160,89"),
            Cell::Empty,
            text("Супермаркеты"),
            text("5411"),
            text("Колхоз"),
            text("160,89"),
        ];
        let txn = mapper().map(&row, 2).unwrap();
        assert_eq!(txn.operation_date, "31.12.2021 16:44:00");
        assert_eq!(txn.payment_date.as_deref(), Some("31.12.2021"));
        assert_eq!(txn.card_key().as_deref(), Some("7197"));
        assert_eq!(txn.operation_amount, -160.89);
        assert_eq!(txn.cashback, None);
        assert_eq!(txn.category.as_deref(), Some("Супермаркеты"));
        assert_eq!(txn.mcc.as_deref(), Some("5411"));
        assert_eq!(txn.rounded_amount, 160.89);
    }

    #[test]
    fn test_map_normalizes_iso_dates() {
        let row = vec![text("2021-12-31 16:44:00")];
        let txn = mapper().map(&row, 2).unwrap();
        assert_eq!(txn.operation_date, "31.12.2021 16:44:00");
    }

    #[test]
    fn test_map_keeps_unrecognised_dates_verbatim() {
        let row = vec![text("вчера")];
        let txn = mapper().map(&row, 2).unwrap();
        assert_eq!(txn.operation_date, "вчера");
    }

    #[test]
    fn test_map_numeric_cells() {
        let row = vec![
            Cell::Number(44561.697222222225),
            Cell::Number(44561.0),
            Cell::Number(7197.0),
            Cell::Number(-160.89),
            Cell::Number(-160.89),
            Cell::Number(f64::NAN),
            Cell::Empty,
            Cell::Number(5411.0),
            text("Колхоз"),
            Cell::Number(160.89),
        ];
        let txn = mapper().map(&row, 2).unwrap();
        assert_eq!(txn.operation_date, "31.12.2021 16:44:00");
        assert_eq!(txn.payment_date.as_deref(), Some("31.12.2021"));
        assert_eq!(txn.card_number, None);
        assert_eq!(txn.valid_cashback(), None);
        assert_eq!(txn.category, None);
        assert_eq!(txn.mcc.as_deref(), Some("5411"));
    }

    #[test]
    fn test_map_missing_date_fails() {
        let row = vec![Cell::Empty, text("31.12.2021")];
        assert!(mapper().map(&row, 7).is_err());
    }

    #[test]
    fn test_amount_decoration() {
        let m = mapper();
        assert_eq!(m.amount(&text("1\u{a0}234,56 ₽")).unwrap(), Some(1234.56));
        assert_eq!(m.amount(&text("-20 000,00")).unwrap(), Some(-20000.0));
        assert_eq!(m.amount(&Cell::Empty).unwrap(), None);
    }

    #[test]
    fn test_amount_thousands_separators() {
        let m = mapper();
        assert_eq!(m.amount(&text("1,234.56")).unwrap(), Some(1234.56));
        assert_eq!(m.amount(&text("-1.234,56")).unwrap(), Some(-1234.56));
        assert_eq!(m.amount(&text("1.234.567,89")).unwrap(), Some(1234567.89));
        assert_eq!(m.amount(&text("$2,000,000.00")).unwrap(), Some(2000000.0));
    }

    #[test]
    fn test_unparseable_amount_fails_the_row() {
        assert!(mapper().amount(&text("n/a")).is_err());

        let row = vec![
            text("31.12.2021 16:44:00"),
            Cell::Empty,
            Cell::Empty,
            text("n/a"),
        ];
        let err = mapper().map(&row, 9).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 9"));
        assert!(msg.contains(headers::OPERATION_AMOUNT));
        assert!(msg.contains("n/a"));
    }
}
