//! Extractor trait for pulling tables from data sources

use crate::table::Table;
use eyre::Result;

/// Extractor trait for extracting a table from a source
///
/// Implementors define how to read a full table from sources like:
/// - Relational databases
/// - Remote tabular documents
/// - Paginated REST APIs
/// - Object storage files
///
/// # Example
/// ```no_run
/// use sales_data_etl::etl::Extractor;
/// use sales_data_etl::table::Table;
/// use eyre::Result;
/// use std::path::PathBuf;
///
/// struct FileExtractor {
///     path: PathBuf,
/// }
///
/// impl Extractor for FileExtractor {
///     async fn extract(&self) -> Result<Table> {
///         // Read the file and build a table
///         Ok(Table::new())
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// Extract the full table from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, I/O, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Table>> + Send;
}
