//! Date event cleaning rules

use super::{UUID_LEN, drop_sentinel, require_length};
use crate::etl::Transformer;
use crate::table::{Table, TableError};
use eyre::Result;

/// Drops `'NULL'` timestamps and malformed `date_uuid` values
#[derive(Debug, Default, Clone, Copy)]
pub struct DateEventCleaner;

impl DateEventCleaner {
    pub fn clean(&self, events: Table) -> Result<Table, TableError> {
        let events = drop_sentinel(events, "timestamp")?;
        require_length(events, "date_uuid", UUID_LEN)
    }
}

impl Transformer for DateEventCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}
