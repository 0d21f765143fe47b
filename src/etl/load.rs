//! Loader trait for writing tables to destinations

use crate::table::Table;
use eyre::Result;

/// Loader trait for loading a table to a destination
///
/// # Example
/// ```no_run
/// use sales_data_etl::etl::Loader;
/// use sales_data_etl::table::Table;
/// use eyre::Result;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     async fn load(&self, table: Table) -> Result<usize> {
///         Ok(table.num_rows())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// Load the table to the destination
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, SQL, etc.)
    fn load(&self, table: Table) -> impl std::future::Future<Output = Result<usize>> + Send;
}
