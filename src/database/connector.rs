//! Connection factory for the relational store

use super::sql::{cell_from_sql, quote_identifier, sql_type};
use crate::config::DbCredentials;
use crate::table::Table;
use eyre::{Context, Result};
use rusqlite::{Connection, params_from_iter};
use std::path::Path;

/// Builds connections from credentials and runs whole-table reads and writes.
///
/// Every operation opens its own connection; nothing is pooled or cached.
/// With an in-memory database (`:memory:`) each operation therefore sees a
/// fresh, empty database.
///
/// # Example
/// ```no_run
/// use sales_data_etl::database::DatabaseConnector;
///
/// # fn example() -> eyre::Result<()> {
/// let connector = DatabaseConnector::from_file("db_creds.yaml")?;
/// for table in connector.list_tables()? {
///     println!("{}", table);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConnector {
    credentials: DbCredentials,
}

impl DatabaseConnector {
    pub fn new(credentials: DbCredentials) -> Self {
        Self { credentials }
    }

    /// Create a connector from a YAML credentials file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(DbCredentials::read(path)?))
    }

    pub fn credentials(&self) -> &DbCredentials {
        &self.credentials
    }

    /// Open a connection to the database
    pub fn connect(&self) -> Result<Connection> {
        log::debug!("Connecting to {}", self.credentials);
        Connection::open(&self.credentials.database)
            .with_context(|| format!("Failed to connect to {}", self.credentials))
    }

    /// List the names of all tables in the database
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let conn = self.connect()?;
        let mut stmt = conn
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .context("Failed to query table names")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read table names")?;
        Ok(names)
    }

    /// Read the full contents of a table
    pub fn read_table(&self, name: &str) -> Result<Table> {
        let conn = self.connect()?;
        let sql = format!("SELECT * FROM {}", quote_identifier(name));
        let mut stmt = conn
            .prepare(&sql)
            .with_context(|| format!("Failed to read table '{}'", name))?;

        let header: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let decl_types: Vec<Option<String>> = stmt
            .columns()
            .iter()
            .map(|c| c.decl_type().map(str::to_uppercase))
            .collect();

        let mut rows = stmt.query([])?;
        let mut data = Vec::new();
        while let Some(row) = rows.next()? {
            let mut cells = Vec::with_capacity(header.len());
            for (i, decl_type) in decl_types.iter().enumerate() {
                cells.push(cell_from_sql(row.get_ref(i)?, decl_type.as_deref()));
            }
            data.push(cells);
        }

        log::debug!("Read {} rows from '{}'", data.len(), name);
        Ok(Table::from_rows(header, data)?)
    }

    /// Write a table, replacing any existing table of the same name.
    ///
    /// Drop, create and insert run in one transaction.
    pub fn upload_table(&self, table: &Table, name: &str) -> Result<usize> {
        if table.num_columns() == 0 {
            eyre::bail!("Cannot create table '{}' with no columns", name);
        }

        let mut conn = self.connect()?;
        let tx = conn.transaction()?;
        let quoted = quote_identifier(name);

        tx.execute(&format!("DROP TABLE IF EXISTS {}", quoted), [])
            .with_context(|| format!("Failed to drop table '{}'", name))?;

        let definitions = table
            .columns()
            .iter()
            .map(|c| format!("{} {}", quote_identifier(c.name()), sql_type(c)))
            .collect::<Vec<_>>()
            .join(", ");
        tx.execute(&format!("CREATE TABLE {} ({})", quoted, definitions), [])
            .with_context(|| format!("Failed to create table '{}'", name))?;

        let placeholders = vec!["?"; table.num_columns()].join(", ");
        let insert = format!("INSERT INTO {} VALUES ({})", quoted, placeholders);
        {
            let mut stmt = tx.prepare(&insert)?;
            for index in 0..table.num_rows() {
                if let Some(row) = table.row(index) {
                    stmt.execute(params_from_iter(row))
                        .with_context(|| format!("Failed to insert row {} into '{}'", index, name))?;
                }
            }
        }
        tx.commit()
            .with_context(|| format!("Failed to commit table '{}'", name))?;

        log::debug!("Wrote {} rows to '{}'", table.num_rows(), name);
        Ok(table.num_rows())
    }
}
