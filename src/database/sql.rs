//! Conversions between table cells and SQLite values

use crate::table::{Cell, Column, parse_date};
use rusqlite::types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef};

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Null => ToSqlOutput::Owned(SqlValue::Null),
            Cell::Bool(b) => ToSqlOutput::Owned(SqlValue::Integer(i64::from(*b))),
            Cell::Int(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Cell::Float(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            Cell::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            Cell::Date(_) | Cell::DateTime(_) => ToSqlOutput::Owned(SqlValue::Text(self.to_string())),
        })
    }
}

/// Build a cell from a SQLite value, using the declared column type to
/// recover booleans and dates
pub(crate) fn cell_from_sql(value: ValueRef<'_>, decl_type: Option<&str>) -> Cell {
    match value {
        ValueRef::Null => Cell::Null,
        ValueRef::Integer(i) if decl_type == Some("BOOLEAN") => Cell::Bool(i != 0),
        ValueRef::Integer(i) => Cell::Int(i),
        ValueRef::Real(f) => Cell::Float(f),
        ValueRef::Text(bytes) => {
            let text = String::from_utf8_lossy(bytes).into_owned();
            match decl_type {
                Some("DATE") | Some("TIMESTAMP") => parse_date(&text).unwrap_or(Cell::Text(text)),
                _ => Cell::Text(text),
            }
        }
        ValueRef::Blob(bytes) => Cell::Text(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Declared SQL type for a column, inferred from its non-missing cells
pub(crate) fn sql_type(column: &Column) -> &'static str {
    let mut kind: Option<&'static str> = None;
    for cell in column.values() {
        let this = match cell {
            Cell::Null => continue,
            Cell::Bool(_) => "BOOLEAN",
            Cell::Int(_) => "INTEGER",
            Cell::Float(_) => "REAL",
            Cell::Text(_) => return "TEXT",
            Cell::Date(_) => "DATE",
            Cell::DateTime(_) => "TIMESTAMP",
        };
        kind = match (kind, this) {
            (None, t) => Some(t),
            (Some(k), t) if k == t => Some(k),
            (Some("INTEGER"), "REAL") | (Some("REAL"), "INTEGER") => Some("REAL"),
            (Some("DATE"), "TIMESTAMP") | (Some("TIMESTAMP"), "DATE") => Some("TIMESTAMP"),
            _ => return "TEXT",
        };
    }
    kind.unwrap_or("TEXT")
}

/// Quote an identifier for use in SQL text
pub(crate) fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
