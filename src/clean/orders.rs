//! Orders cleaning rules

use crate::etl::Transformer;
use crate::table::{Table, TableError};
use eyre::Result;

/// Columns left behind by extraction and joins in the source system
const REDUNDANT_COLUMNS: &[&str] = &["level_0", "index", "first_name", "last_name", "1"];

/// Prunes redundant columns from the orders table; rows are kept as-is
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderCleaner;

impl OrderCleaner {
    pub fn clean(&self, orders: Table) -> Result<Table, TableError> {
        orders.drop_columns(REDUNDANT_COLUMNS)
    }
}

impl Transformer for OrderCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}
