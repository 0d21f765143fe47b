//! Parsing CSV and JSON text into tables

use crate::table::{Cell, Table};
use eyre::{Context, Result, eyre};
use serde_json::{Map, Value};

/// Parse CSV text with a header row.
///
/// Empty header names become `unnamed_<position>`; field types are inferred
/// per cell (see [`Cell::infer`]).
pub fn parse_csv(text: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let header: Vec<String> = reader
        .headers()
        .context("Failed to read CSV header")?
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let name = name.trim();
            if name.is_empty() {
                format!("unnamed_{}", i)
            } else {
                name.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Failed to parse CSV record {}", line + 1))?;
        rows.push(record.iter().map(Cell::infer).collect());
    }

    Ok(Table::from_rows(header, rows)?)
}

/// Parse a JSON document into a table.
///
/// Two layouts are accepted:
/// - an array of record objects
/// - a column-oriented object, `{"column": {"0": value, "1": value}}`,
///   whose rows are ordered by their numeric keys
pub fn parse_json(text: &str) -> Result<Table> {
    let value: Value = serde_json::from_str(text).context("Failed to parse JSON document")?;
    match value {
        Value::Array(items) => {
            let records = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| match item {
                    Value::Object(record) => Ok(record),
                    other => Err(eyre!("JSON record {} is not an object: {}", i, other)),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Table::from_records(&records))
        }
        Value::Object(columns) => columns_to_table(columns),
        other => Err(eyre!("Unsupported JSON document: expected array or object, got {}", other)),
    }
}

fn columns_to_table(columns: Map<String, Value>) -> Result<Table> {
    let mut keys: Vec<(u64, String)> = Vec::new();
    for (name, column) in &columns {
        let column = column
            .as_object()
            .ok_or_else(|| eyre!("JSON column '{}' is not an object", name))?;
        for key in column.keys() {
            if keys.iter().any(|(_, k)| k == key) {
                continue;
            }
            let position = key
                .parse::<u64>()
                .with_context(|| format!("JSON column '{}' has non-numeric row key '{}'", name, key))?;
            keys.push((position, key.clone()));
        }
    }
    keys.sort_by_key(|(position, _)| *position);

    let header: Vec<String> = columns.keys().cloned().collect();
    let rows = keys
        .iter()
        .map(|(_, key)| {
            columns
                .values()
                .map(|column| column.get(key).map(Cell::from).unwrap_or(Cell::Null))
                .collect()
        })
        .collect();

    Ok(Table::from_rows(header, rows)?)
}
