//! In-memory column-oriented tables
//!
//! A [`Table`] is an ordered list of named columns with one [`Cell`] per row.
//! Columns are addressed by name, rows by position. Row positions are always
//! contiguous from 0: filtering rows rebuilds every column.
//!
//! Table operations consume `self` and return a new table so each cleaning
//! step can be tested in isolation.

mod cell;
mod dates;
mod error;

pub use cell::Cell;
pub use dates::{calendar_date, parse_date, to_date_cell};
pub use error::TableError;

use serde_json::{Map, Value};

/// A named column of cells
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[Cell] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// In-memory table of named columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table with no columns
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a header and row-major data.
    ///
    /// Short rows are padded with missing values; extra cells are ignored.
    pub fn from_rows(header: Vec<String>, rows: Vec<Vec<Cell>>) -> Result<Self, TableError> {
        let mut columns: Vec<Column> = Vec::with_capacity(header.len());
        for name in header {
            if columns.iter().any(|c| c.name == name) {
                return Err(TableError::DuplicateColumn(name));
            }
            columns.push(Column::new(name, Vec::with_capacity(rows.len())));
        }

        for row in rows {
            let mut cells = row.into_iter();
            for column in columns.iter_mut() {
                column.values.push(cells.next().unwrap_or(Cell::Null));
            }
        }

        Ok(Self { columns })
    }

    /// Build a table from JSON records.
    ///
    /// Columns appear in first-seen key order; records lacking a key get a
    /// missing value in that column.
    pub fn from_records(records: &[Map<String, Value>]) -> Self {
        let mut table = Table::new();
        for record in records {
            table.push_record(record);
        }
        table
    }

    /// Append one JSON record as a row
    pub fn push_record(&mut self, record: &Map<String, Value>) {
        let rows = self.num_rows();
        for key in record.keys() {
            if self.position(key).is_none() {
                self.columns
                    .push(Column::new(key.clone(), vec![Cell::Null; rows]));
            }
        }
        for column in self.columns.iter_mut() {
            let cell = record.get(&column.name).map(Cell::from).unwrap_or(Cell::Null);
            column.values.push(cell);
        }
    }

    /// Concatenate tables row-wise, in order.
    ///
    /// The result has the union of all columns in first-seen order.
    pub fn concat(tables: impl IntoIterator<Item = Table>) -> Self {
        let mut result = Table::new();
        for table in tables {
            let offset = result.num_rows();
            let added = table.num_rows();
            for column in table.columns {
                match result.position(&column.name) {
                    Some(i) => result.columns[i].values.extend(column.values),
                    None => {
                        let mut values = vec![Cell::Null; offset];
                        values.extend(column.values);
                        result.columns.push(Column::new(column.name, values));
                    }
                }
            }
            let expected = offset + added;
            for column in result.columns.iter_mut() {
                column.values.resize(expected, Cell::Null);
            }
        }
        result
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map(Column::len).unwrap_or(0)
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a column by name
    pub fn column(&self, name: &str) -> Result<&Column, TableError> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    /// Cell at a row position in a named column
    pub fn cell(&self, column: &str, row: usize) -> Result<&Cell, TableError> {
        let column = self.column(column)?;
        column.values.get(row).ok_or(TableError::LengthMismatch {
            column: column.name.clone(),
            expected: row + 1,
            found: column.len(),
        })
    }

    /// Cells of one row, in column order
    pub fn row(&self, index: usize) -> Option<Vec<&Cell>> {
        if index >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Add a column at the end of the table
    pub fn with_column(mut self, column: Column) -> Result<Self, TableError> {
        if self.has_column(&column.name) {
            return Err(TableError::DuplicateColumn(column.name));
        }
        if !self.columns.is_empty() && column.len() != self.num_rows() {
            return Err(TableError::LengthMismatch {
                column: column.name,
                expected: self.num_rows(),
                found: column.values.len(),
            });
        }
        self.columns.push(column);
        Ok(self)
    }

    /// Remove named columns; every name must exist
    pub fn drop_columns(mut self, names: &[&str]) -> Result<Self, TableError> {
        for name in names {
            let i = self
                .position(name)
                .ok_or_else(|| TableError::MissingColumn(name.to_string()))?;
            self.columns.remove(i);
        }
        Ok(self)
    }

    /// Keep only rows whose mask entry is `true`
    pub fn filter_rows(mut self, mask: &[bool]) -> Self {
        for column in self.columns.iter_mut() {
            let values = std::mem::take(&mut column.values);
            column.values = values
                .into_iter()
                .zip(mask.iter().copied().chain(std::iter::repeat(false)))
                .filter_map(|(cell, keep)| keep.then_some(cell))
                .collect();
        }
        self
    }

    /// Keep rows where the predicate holds for the cell in `column`
    pub fn retain_where(
        self,
        column: &str,
        keep: impl Fn(&Cell) -> bool,
    ) -> Result<Self, TableError> {
        let mask: Vec<bool> = self.column(column)?.values.iter().map(keep).collect();
        Ok(self.filter_rows(&mask))
    }

    /// Drop rows containing a missing value in any column
    pub fn drop_missing(self) -> Self {
        let mask: Vec<bool> = (0..self.num_rows())
            .map(|row| self.columns.iter().all(|c| !c.values[row].is_null()))
            .collect();
        self.filter_rows(&mask)
    }

    /// Replace every cell of a column with `f(cell)`
    pub fn map_column(
        self,
        column: &str,
        mut f: impl FnMut(Cell) -> Cell,
    ) -> Result<Self, TableError> {
        self.try_map_column(column, |_, cell| Ok::<_, TableError>(f(cell)))
    }

    /// Replace every cell of a column with a fallible `f(row, cell)`
    pub fn try_map_column<E>(
        mut self,
        column: &str,
        mut f: impl FnMut(usize, Cell) -> Result<Cell, E>,
    ) -> Result<Self, E>
    where
        E: From<TableError>,
    {
        let i = self
            .position(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
        let values = std::mem::take(&mut self.columns[i].values);
        self.columns[i].values = values
            .into_iter()
            .enumerate()
            .map(|(row, cell)| f(row, cell))
            .collect::<Result<_, E>>()?;
        Ok(self)
    }

    /// Set a single cell
    pub fn set_cell(mut self, column: &str, row: usize, value: Cell) -> Result<Self, TableError> {
        let rows = self.num_rows();
        let i = self
            .position(column)
            .ok_or_else(|| TableError::MissingColumn(column.to_string()))?;
        match self.columns[i].values.get_mut(row) {
            Some(cell) => *cell = value,
            None => {
                return Err(TableError::LengthMismatch {
                    column: column.to_string(),
                    expected: row + 1,
                    found: rows,
                });
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_rows(
            vec!["id".to_string(), "name".to_string()],
            vec![
                vec![Cell::Int(1), Cell::from("a")],
                vec![Cell::Int(2), Cell::Null],
                vec![Cell::Int(3), Cell::from("c")],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_from_rows_pads_short_rows() {
        let table = Table::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Cell::Int(1)]],
        )
        .unwrap();
        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.cell("b", 0).unwrap(), &Cell::Null);
    }

    #[test]
    fn test_duplicate_header() {
        let result = Table::from_rows(vec!["a".to_string(), "a".to_string()], vec![]);
        assert_eq!(result, Err(TableError::DuplicateColumn("a".to_string())));
    }

    #[test]
    fn test_drop_columns() {
        let table = sample().drop_columns(&["name"]).unwrap();
        assert_eq!(table.column_names(), vec!["id"]);

        let missing = sample().drop_columns(&["nope"]);
        assert_eq!(missing, Err(TableError::MissingColumn("nope".to_string())));
    }

    #[test]
    fn test_retain_where_reindexes() {
        let table = sample()
            .retain_where("id", |c| c != &Cell::Int(1))
            .unwrap();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell("id", 0).unwrap(), &Cell::Int(2));
        assert_eq!(table.cell("id", 1).unwrap(), &Cell::Int(3));
    }

    #[test]
    fn test_drop_missing() {
        let table = sample().drop_missing();
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell("name", 1).unwrap(), &Cell::from("c"));
    }

    #[test]
    fn test_map_column() {
        let table = sample()
            .map_column("id", |c| match c {
                Cell::Int(i) => Cell::Int(i * 10),
                other => other,
            })
            .unwrap();
        assert_eq!(table.cell("id", 2).unwrap(), &Cell::Int(30));
    }

    #[test]
    fn test_from_records_and_concat() {
        let first = json!({"index": 0, "address": "N/A"});
        let second = json!({"index": 1, "lat": 51.5});
        let a = Table::from_records(&[first.as_object().unwrap().clone()]);
        let b = Table::from_records(&[second.as_object().unwrap().clone()]);

        let table = Table::concat([a, b]);
        assert_eq!(table.column_names(), vec!["index", "address", "lat"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.cell("lat", 0).unwrap(), &Cell::Null);
        assert_eq!(table.cell("address", 1).unwrap(), &Cell::Null);
        assert_eq!(table.cell("lat", 1).unwrap(), &Cell::Float(51.5));
    }

    #[test]
    fn test_set_cell() {
        let table = sample().set_cell("name", 0, Cell::from("N/A")).unwrap();
        assert_eq!(table.cell("name", 0).unwrap(), &Cell::from("N/A"));
        assert!(sample().set_cell("name", 9, Cell::Null).is_err());
    }

    #[test]
    fn test_with_column_length_check() {
        let result = sample().with_column(Column::new("x", vec![Cell::Null]));
        assert!(matches!(result, Err(TableError::LengthMismatch { .. })));
    }
}
