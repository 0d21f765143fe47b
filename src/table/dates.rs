//! Lenient date parsing for source data
//!
//! Source systems write dates in several layouts (`1968-10-16`,
//! `1968/10/16`, `October 1968 16`, `1968 October 16`, `10/16/1968`),
//! sometimes with a time part. Values with a time part become
//! [`Cell::DateTime`], plain dates become [`Cell::Date`].

use super::Cell;
use chrono::{NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%Y %B %d",
    "%B %Y %d",
    "%Y %b %d",
    "%b %Y %d",
    "%d %B %Y",
];

/// Parse a date or datetime string.
///
/// Returns `None` when no known layout matches.
pub fn parse_date(raw: &str) -> Option<Cell> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Cell::DateTime(dt));
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(Cell::Date(date));
        }
    }

    None
}

/// Convert an arbitrary cell to a date cell.
///
/// Missing values stay missing, dates pass through, text is parsed.
/// `Err` carries the rendered value that could not be parsed.
pub fn to_date_cell(cell: Cell) -> Result<Cell, String> {
    match cell {
        Cell::Null | Cell::Date(_) | Cell::DateTime(_) => Ok(cell),
        Cell::Text(s) => parse_date(&s).ok_or(s),
        other => Err(other.to_string()),
    }
}

/// Calendar date of a date or datetime cell
pub fn calendar_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        Cell::DateTime(dt) => Some(dt.date()),
        _ => None,
    }
}
