//! Store details cleaning rules

use super::{digits_only, drop_sentinel, parse_dates, require_length};
use crate::etl::Transformer;
use crate::table::{Cell, Table, TableError};
use eyre::Result;

/// Typo prefix found on some continent names (`eeEurope`)
const CONTINENT_TYPO: &str = "ee";

/// Placeholder for location fields of the web portal
const NOT_APPLICABLE: &str = "N/A";

/// `index` of the web portal in the source data
const WEB_PORTAL_INDEX: i64 = 0;

/// Cleans raw store rows
///
/// The source row with `index` 0 is the web portal pseudo-store, which has
/// no physical location: when it survives the filters its longitude is
/// cleared and its country code and continent become `N/A`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoreCleaner;

impl StoreCleaner {
    pub fn clean(&self, stores: Table) -> Result<Table, TableError> {
        let stores = drop_sentinel(stores, "country_code")?;
        let stores = require_length(stores, "country_code", 2)?;
        let stores = parse_dates(stores, "opening_date")?;

        let portal = stores
            .column("index")?
            .values()
            .iter()
            .position(|cell| is_index(cell, WEB_PORTAL_INDEX));
        let stores = match portal {
            Some(row) => stores
                .set_cell("longitude", row, Cell::Null)?
                .set_cell("country_code", row, Cell::from(NOT_APPLICABLE))?
                .set_cell("continent", row, Cell::from(NOT_APPLICABLE))?,
            None => stores,
        };
        let stores = stores.drop_columns(&["index", "lat"])?;

        let stores = stores.map_column("continent", |cell| match cell {
            Cell::Text(continent) => match continent.strip_prefix(CONTINENT_TYPO) {
                Some(fixed) => Cell::from(fixed),
                None => Cell::Text(continent),
            },
            other => other,
        })?;

        stores.map_column("staff_numbers", digits_only)
    }
}

fn is_index(cell: &Cell, index: i64) -> bool {
    match cell {
        Cell::Int(i) => *i == index,
        Cell::Text(s) => s.trim().parse::<i64>() == Ok(index),
        _ => false,
    }
}

impl Transformer for StoreCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}
