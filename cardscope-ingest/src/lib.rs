//! cardscope-ingest: statement readers (xlsx and CSV) producing transaction records.

pub mod parsers;
pub mod types;

use std::path::Path;

use anyhow::{bail, Result};
use cardscope_core::Transaction;

pub use parsers::csv_export::{parse_csv, parse_csv_text};
pub use parsers::xlsx::{parse_rows, parse_xlsx};
pub use types::{Cell, ColumnMap};

/// Read a statement, choosing the reader from the file extension.
pub fn read_statement(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let txns = match ext.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => parse_xlsx(path)?,
        "csv" | "txt" => parse_csv(path)?,
        _ => bail!(
            "unsupported statement format: {} (expected .xlsx or .csv)",
            path.display()
        ),
    };
    tracing::info!(path = %path.display(), transactions = txns.len(), "loaded statement");
    Ok(txns)
}
