//! Pipeline orchestration for ETL operations

use super::{Extractor, Loader, Transformer};
use eyre::Result;

/// ETL Pipeline that orchestrates Extract, Transform, and Load operations
/// for one entity.
///
/// # Type Parameters
/// - `E`: Extractor type
/// - `T`: Transformer (cleaner) type
/// - `L`: Loader type
///
/// # Example
/// ```no_run
/// use sales_data_etl::etl::{IdentityTransformer, Pipeline};
/// # use sales_data_etl::etl::{Extractor, Loader};
/// # use sales_data_etl::table::Table;
/// # use eyre::Result;
/// # struct MyExtractor;
/// # impl Extractor for MyExtractor {
/// #     async fn extract(&self) -> Result<Table> { Ok(Table::new()) }
/// # }
/// # struct MyLoader;
/// # impl Loader for MyLoader {
/// #     async fn load(&self, table: Table) -> Result<usize> { Ok(table.num_rows()) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(MyExtractor, IdentityTransformer, MyLoader);
///
/// let count = pipeline.run().await?;
/// println!("Loaded {} rows", count);
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<E, T, L> {
    extractor: E,
    transformer: T,
    loader: L,
}

impl<E, T, L> Pipeline<E, T, L>
where
    E: Extractor,
    T: Transformer,
    L: Loader,
{
    /// Create a new pipeline
    pub fn new(extractor: E, transformer: T, loader: L) -> Self {
        Self {
            extractor,
            transformer,
            loader,
        }
    }

    /// Run the complete ETL pipeline
    ///
    /// Steps:
    /// 1. Extract the table from the source
    /// 2. Clean it
    /// 3. Load it to the destination
    ///
    /// Returns the number of rows loaded. An empty extraction is still
    /// cleaned and loaded, so the cleaner's column checks apply and the
    /// destination ends up empty.
    ///
    /// # Errors
    /// Returns an error if any stage fails
    pub async fn run(&self) -> Result<usize> {
        log::info!("Starting ETL pipeline");

        // Extract
        log::debug!("Extracting from source...");
        let table = self.extractor.extract().await?;
        log::info!(
            "Extracted {} rows x {} columns",
            table.num_rows(),
            table.num_columns()
        );

        // An empty source still replaces the destination
        if table.is_empty() {
            log::warn!("No rows extracted, destination will be emptied");
        }

        // Transform
        log::debug!("Cleaning table...");
        let extracted = table.num_rows();
        let cleaned = self.transformer.transform(table)?;
        log::info!(
            "Cleaned table has {} rows ({} dropped)",
            cleaned.num_rows(),
            extracted.saturating_sub(cleaned.num_rows())
        );

        // Load
        log::debug!("Loading to destination...");
        let count = self.loader.load(cleaned).await?;
        log::info!("Loaded {} rows", count);

        Ok(count)
    }
}
