//! Excel statement reader (`.xlsx`, `.xls`, `.xlsm`, `.ods`).

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{Data, Reader};
use cardscope_core::Transaction;

use crate::parsers::row::RowMapper;
use crate::types::{Cell, ColumnMap};

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::text(s),
            Data::Bool(b) => Cell::Text(b.to_string()),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::text(s),
            Data::Error(_) | Data::Empty => Cell::Empty,
        }
    }
}

/// Read the first worksheet of a workbook. The first row is the header.
pub fn parse_xlsx(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let mut workbook = calamine::open_workbook_auto(path)
        .map_err(|e| anyhow!("opening {}: {e}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("{} has no worksheets", path.display()))?
        .map_err(|e| anyhow!("reading first worksheet of {}: {e}", path.display()))?;

    let rows: Vec<Vec<Cell>> = range
        .rows()
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();
    parse_rows(&rows)
}

/// Map a header row followed by data rows. Fully empty rows are skipped.
pub fn parse_rows(rows: &[Vec<Cell>]) -> Result<Vec<Transaction>> {
    let Some((header, data)) = rows.split_first() else {
        return Ok(Vec::new());
    };

    let names: Vec<String> = header
        .iter()
        .map(|c| match c {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        })
        .collect();
    let mapper = RowMapper::new(ColumnMap::from_headers(names.iter().map(String::as_str))?)?;

    let mut txns = Vec::new();
    for (i, row) in data.iter().enumerate() {
        if row.iter().all(|c| *c == Cell::Empty) {
            continue;
        }
        // header is line 1
        txns.push(mapper.map(row, i + 2)?);
    }
    tracing::debug!(rows = txns.len(), "parsed workbook rows");
    Ok(txns)
}
