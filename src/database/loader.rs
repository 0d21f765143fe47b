//! Destination table loader

use super::DatabaseConnector;
use crate::etl::Loader;
use crate::table::Table;
use eyre::Result;

/// Loads a cleaned table into the destination database, replacing any
/// table of the same name
pub struct TableLoader {
    connector: DatabaseConnector,
    table: String,
}

impl TableLoader {
    pub fn new(connector: DatabaseConnector, table: impl Into<String>) -> Self {
        Self {
            connector,
            table: table.into(),
        }
    }
}

impl Loader for TableLoader {
    async fn load(&self, table: Table) -> Result<usize> {
        log::debug!("Replacing table '{}'", self.table);
        self.connector.upload_table(&table, &self.table)
    }
}
