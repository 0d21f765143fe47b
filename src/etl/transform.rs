//! Transformer trait for table cleaning

use crate::table::Table;
use eyre::Result;

/// Transformer trait for turning a raw table into a cleaned one
///
/// Implementors define per-entity cleaning:
/// - Dropping redundant columns
/// - Dropping invalid rows
/// - Normalizing values and parsing dates
///
/// # Example
/// ```
/// use sales_data_etl::etl::Transformer;
/// use sales_data_etl::table::Table;
/// use eyre::Result;
///
/// struct ColumnDropper {
///     columns: Vec<&'static str>,
/// }
///
/// impl Transformer for ColumnDropper {
///     fn transform(&self, table: Table) -> Result<Table> {
///         Ok(table.drop_columns(&self.columns)?)
///     }
/// }
/// ```
pub trait Transformer: Send + Sync {
    /// Transform a whole table
    ///
    /// # Errors
    /// Returns an error if a rule cannot be applied (missing column,
    /// unparseable value, etc.). No partial result is returned.
    fn transform(&self, table: Table) -> Result<Table>;
}

/// Passes tables through unchanged
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityTransformer;

impl Transformer for IdentityTransformer {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(table)
    }
}
