//! CSV statement exports.
//!
//! Banks export either `;`-separated files with decimal commas or plain
//! comma-separated files; the delimiter is taken from the header line.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use cardscope_core::Transaction;

use crate::parsers::row::RowMapper;
use crate::types::{Cell, ColumnMap};

/// `;` if the header line contains one, otherwise `,`.
pub fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or("");
    if header.contains(';') { b';' } else { b',' }
}

pub fn parse_csv(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let bytes = fs::read(path).with_context(|| format!("opening {}", path.display()))?;
    let text = decode_export(bytes);
    parse_csv_text(&text).with_context(|| format!("parsing {}", path.display()))
}

/// UTF-8 when valid, otherwise Windows-1251 (the bank's legacy export encoding).
pub fn decode_export(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1251.decode(&bytes);
            tracing::debug!("statement is not UTF-8, decoded as windows-1251");
            decoded.into_owned()
        }
    }
}

pub fn parse_csv_text(text: &str) -> Result<Vec<Transaction>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(sniff_delimiter(text))
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = ColumnMap::from_headers(rdr.headers()?.iter())?;
    let mapper = RowMapper::new(columns)?;

    let mut txns = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        let cells: Vec<Cell> = record.iter().map(Cell::text).collect();
        txns.push(mapper.map(&cells, i + 2)?);
    }

    tracing::debug!(rows = txns.len(), "parsed csv rows");
    Ok(txns)
}
