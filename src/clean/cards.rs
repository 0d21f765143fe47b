//! Card details cleaning rules

use super::{digits_only, drop_sentinel, parse_dates, require_length};
use crate::etl::Transformer;
use crate::table::{Table, TableError};
use eyre::Result;

/// Expected shape of an expiry date, `MM/YY`
const EXPIRY_LEN: usize = 5;

/// Cleans raw card detail rows
///
/// Drops `'NULL'` card numbers and malformed expiry dates, reduces card
/// numbers to their digits and parses `date_payment_confirmed`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CardCleaner;

impl CardCleaner {
    pub fn clean(&self, cards: Table) -> Result<Table, TableError> {
        let cards = drop_sentinel(cards, "card_number")?;
        let cards = require_length(cards, "expiry_date", EXPIRY_LEN)?;
        let cards = cards.map_column("card_number", digits_only)?;
        parse_dates(cards, "date_payment_confirmed")
    }
}

impl Transformer for CardCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Cell;

    fn cards(rows: Vec<(Cell, &str, &str)>) -> Table {
        Table::from_rows(
            vec![
                "card_number".to_string(),
                "expiry_date".to_string(),
                "card_provider".to_string(),
                "date_payment_confirmed".to_string(),
            ],
            rows.into_iter()
                .map(|(number, expiry, confirmed)| {
                    vec![number, Cell::from(expiry), Cell::from("VISA 16 digit"), Cell::from(confirmed)]
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_expiry_length() {
        let table = cards(vec![
            (Cell::from("4971858637664481"), "13/25", "2015-11-25"),
            (Cell::from("3554954842403828"), "1/25", "2015-11-25"),
        ]);

        let cleaned = CardCleaner.clean(table).unwrap();
        assert_eq!(cleaned.num_rows(), 1);
        assert_eq!(cleaned.cell("expiry_date", 0).unwrap(), &Cell::from("13/25"));
    }

    #[test]
    fn test_card_numbers_become_digit_strings() {
        let table = cards(vec![
            (Cell::from("NULL"), "NULL", "NULL"),
            (Cell::from("??4971858637664481"), "09/26", "2015-11-25"),
            (Cell::Int(30060773296197), "10/23", "2001-06-18"),
        ]);

        let cleaned = CardCleaner.clean(table).unwrap();
        // contiguous positions after the dropped first row
        assert_eq!(cleaned.num_rows(), 2);
        assert_eq!(cleaned.cell("card_number", 0).unwrap(), &Cell::from("4971858637664481"));
        assert_eq!(cleaned.cell("card_number", 1).unwrap(), &Cell::from("30060773296197"));
        assert!(matches!(
            cleaned.cell("date_payment_confirmed", 1).unwrap(),
            Cell::Date(_)
        ));
    }

    #[test]
    fn test_unparseable_payment_date() {
        let table = cards(vec![(Cell::from("4971858637664481"), "09/26", "ABC123")]);
        assert!(matches!(
            CardCleaner.clean(table),
            Err(TableError::InvalidDate { row: 0, .. })
        ));
    }
}
