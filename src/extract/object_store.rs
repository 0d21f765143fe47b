//! Flat-file extractor for CSV and JSON objects

use super::Location;
use super::parse::{parse_csv, parse_json};
use crate::etl::Extractor;
use crate::table::Table;
use eyre::{Context, Result};

/// Supported flat-file formats, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    fn from_location(location: &Location) -> Result<Self> {
        match location.extension().as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("json") => Ok(Self::Json),
            Some(other) => eyre::bail!("Unsupported file type '.{}': {}", other, location),
            None => eyre::bail!("Cannot determine file type without an extension: {}", location),
        }
    }
}

/// Extracts a CSV or JSON file from object storage, HTTP or local disk
///
/// # Example
/// ```no_run
/// use sales_data_etl::extract::ObjectStoreExtractor;
/// use sales_data_etl::etl::Extractor;
///
/// # async fn example() -> eyre::Result<()> {
/// let extractor = ObjectStoreExtractor::new("s3://data-handling-public/products.csv")?;
/// let products = extractor.extract().await?;
/// # Ok(())
/// # }
/// ```
pub struct ObjectStoreExtractor {
    location: Location,
    format: FileFormat,
}

impl ObjectStoreExtractor {
    pub fn new(reference: &str) -> Result<Self> {
        let location = Location::parse(reference)?;
        let format = FileFormat::from_location(&location)?;
        Ok(Self { location, format })
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }
}

impl Extractor for ObjectStoreExtractor {
    async fn extract(&self) -> Result<Table> {
        log::debug!("Reading {:?} file {}", self.format, self.location);
        let text = self.location.read_text().await?;
        let table = match self.format {
            FileFormat::Csv => parse_csv(&text),
            FileFormat::Json => parse_json(&text),
        };
        table.with_context(|| format!("Failed to parse {}", self.location))
    }
}
