//! Per-entity cleaning rules
//!
//! Each cleaner consumes a raw table and either returns the fully cleaned
//! table or fails with a [`TableError`] naming the offending column. The
//! one graceful case is product weights: unparseable weights drop their
//! rows instead of failing.

mod cards;
mod date_events;
mod orders;
mod products;
mod stores;
mod users;
mod weight;

pub use cards::CardCleaner;
pub use date_events::DateEventCleaner;
pub use orders::OrderCleaner;
pub use products::ProductCleaner;
pub use stores::StoreCleaner;
pub use users::{UserCleaner, normalize_phone_number};
pub use weight::{KG_PER_OUNCE, convert_product_weight, convert_weight_cell};

use crate::table::{Cell, Table, TableError, to_date_cell};

/// Marker string used by source systems for corrupted rows
pub const NULL_SENTINEL: &str = "NULL";

/// Length of a textual UUID
pub const UUID_LEN: usize = 36;

/// Keep rows where `keep` holds for `column`, logging how many were dropped
fn retain_logged(
    table: Table,
    column: &str,
    rule: &str,
    keep: impl Fn(&Cell) -> bool,
) -> Result<Table, TableError> {
    let before = table.num_rows();
    let table = table.retain_where(column, keep)?;
    let dropped = before - table.num_rows();
    if dropped > 0 {
        log::debug!("Dropped {} row(s) where {} {}", dropped, column, rule);
    }
    Ok(table)
}

/// Drop rows whose `column` holds the `"NULL"` sentinel
fn drop_sentinel(table: Table, column: &str) -> Result<Table, TableError> {
    retain_logged(table, column, "is 'NULL'", |cell| !cell.is_text(NULL_SENTINEL))
}

/// Drop rows whose rendered `column` value is not exactly `len` characters
fn require_length(table: Table, column: &str, len: usize) -> Result<Table, TableError> {
    let rule = format!("is not {} characters", len);
    retain_logged(table, column, &rule, |cell| cell.char_len() == Some(len))
}

/// Parse every value of `column` as a date, failing on the first bad value
fn parse_dates(table: Table, column: &str) -> Result<Table, TableError> {
    table.try_map_column(column, |row, cell| {
        to_date_cell(cell).map_err(|value| TableError::InvalidDate {
            column: column.to_string(),
            row,
            value,
        })
    })
}

/// Render a cell as text and keep only its ASCII digits
fn digits_only(cell: Cell) -> Cell {
    match cell.render() {
        Some(text) => Cell::Text(text.chars().filter(char::is_ascii_digit).collect()),
        None => Cell::Null,
    }
}
