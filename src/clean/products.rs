//! Product cleaning rules

use super::{convert_weight_cell, parse_dates};
use crate::etl::Transformer;
use crate::table::{Cell, Table, TableError};
use eyre::Result;

/// Cleans raw product rows
///
/// Rows with any missing value are dropped, weights are converted to
/// kilograms and rows with unrecognised weights are dropped.
#[derive(Debug, Clone)]
pub struct ProductCleaner {
    index_column: String,
}

impl Default for ProductCleaner {
    fn default() -> Self {
        Self {
            index_column: "unnamed_0".to_string(),
        }
    }
}

impl ProductCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name of the row-index column written by the exporting system
    pub fn with_index_column(mut self, name: impl Into<String>) -> Self {
        self.index_column = name.into();
        self
    }

    pub fn clean(&self, products: Table) -> Result<Table, TableError> {
        let before = products.num_rows();
        let products = products.drop_missing();
        log::debug!("Dropped {} row(s) with missing values", before - products.num_rows());

        let products = products.map_column("weight", convert_weight_cell)?;
        let before = products.num_rows();
        let products = products.retain_where("weight", |cell| !matches!(cell, Cell::Text(_)))?;
        let unparsed = before - products.num_rows();
        if unparsed > 0 {
            log::warn!("Dropped {} product(s) with unrecognised weights", unparsed);
        }

        let products = products.drop_columns(&[self.index_column.as_str()])?;
        parse_dates(products, "date_added")
    }
}

impl Transformer for ProductCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::parse_csv;

    const PRODUCTS: &str = "\
,product_name,product_price,weight,category,EAN,date_added,uuid,removed,product_code
0,FurReal Dazzlin' Dimples,£39.99,1.6kg,toys-and-games,7425710935115,2005-12-02,83dc0a69,Still_avaliable,R7-3126933h
1,Tiffany Plush,£9.99,12 x 100g,toys-and-games,487128731892,2006-01-09,712254d7,Still_avaliable,C2-7287916l
2,Broken Row,£1.00,,toys-and-games,1,2006-01-09,abc,Still_avaliable,X
3,Mystery Box,£5.00,9GO9NZ5JTL,toys-and-games,2,2006-01-09,def,Still_avaliable,Y
4,Ham,£2.00,16oz,food-and-drink,3,2008-04-10,ghi,Still_avaliable,Z
";

    #[test]
    fn test_clean_products() {
        let table = parse_csv(PRODUCTS).unwrap();
        let cleaned = ProductCleaner::new().clean(table).unwrap();

        assert_eq!(cleaned.num_rows(), 3);
        assert!(!cleaned.has_column("unnamed_0"));
        assert_eq!(cleaned.cell("weight", 0).unwrap(), &Cell::Float(1.6));
        assert_eq!(cleaned.cell("weight", 1).unwrap(), &Cell::Float(1.2));
        assert_eq!(cleaned.cell("product_name", 2).unwrap(), &Cell::from("Ham"));
        assert!(matches!(cleaned.cell("date_added", 0).unwrap(), Cell::Date(_)));
    }

    #[test]
    fn test_bad_date_added_fails() {
        let csv = PRODUCTS.replace("2008-04-10", "XCD69KUI0K");
        let table = parse_csv(&csv).unwrap();

        let err = ProductCleaner::new().clean(table).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidDate {
                column: "date_added".to_string(),
                row: 2,
                value: "XCD69KUI0K".to_string()
            }
        );
    }

    #[test]
    fn test_custom_index_column() {
        let table = parse_csv(PRODUCTS).unwrap();
        let result = ProductCleaner::new().with_index_column("Unnamed: 0").clean(table);
        assert_eq!(result, Err(TableError::MissingColumn("Unnamed: 0".to_string())));
    }
}
