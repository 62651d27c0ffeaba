//! Statement readers. Each one turns a file into cells, and [`row::RowMapper`]
//! turns cells into transactions.

pub mod csv_export;
pub mod row;
pub mod xlsx;
