//! Relational table extractor

use super::DatabaseConnector;
use crate::etl::Extractor;
use crate::table::Table;
use eyre::Result;

/// Extracts a full table from the source database
///
/// # Example
/// ```no_run
/// use sales_data_etl::database::{DatabaseConnector, TableExtractor};
/// use sales_data_etl::etl::Extractor;
///
/// # async fn example() -> eyre::Result<()> {
/// let connector = DatabaseConnector::from_file("db_creds.yaml")?;
/// let extractor = TableExtractor::new(connector, "legacy_users");
/// let users = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct TableExtractor {
    connector: DatabaseConnector,
    table: String,
}

impl TableExtractor {
    pub fn new(connector: DatabaseConnector, table: impl Into<String>) -> Self {
        Self {
            connector,
            table: table.into(),
        }
    }
}

impl Extractor for TableExtractor {
    async fn extract(&self) -> Result<Table> {
        log::debug!("Reading table '{}'", self.table);
        self.connector.read_table(&self.table)
    }
}
