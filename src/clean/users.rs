//! User cleaning rules

use super::{UUID_LEN, drop_sentinel, parse_dates, require_length};
use crate::etl::Transformer;
use crate::table::{Cell, Table, TableError, calendar_date};
use eyre::Result;
use regex::Regex;
use std::sync::LazyLock;

/// International dialling prefixes and `x123` style extensions
static PHONE_PREFIX_OR_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\+1|\+44|\+49|x\w+").expect("phone prefix pattern is valid"));

/// Cleans raw user rows
///
/// - drops the `index` column
/// - drops rows with a `'NULL'` first name or a malformed `user_uuid`
/// - joins multi-line addresses
/// - parses `date_of_birth` and `join_date`
/// - fixes the `GGB` country code typo
/// - normalizes phone numbers per country
///
/// Dropping users born after they joined is off unless enabled with
/// [`UserCleaner::drop_birth_after_join`].
#[derive(Debug, Default, Clone)]
pub struct UserCleaner {
    drop_birth_after_join: bool,
}

impl UserCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also drop rows whose `date_of_birth` is later than `join_date`
    pub fn drop_birth_after_join(mut self, enabled: bool) -> Self {
        self.drop_birth_after_join = enabled;
        self
    }

    pub fn clean(&self, users: Table) -> Result<Table, TableError> {
        let users = users.drop_columns(&["index"])?;
        let users = drop_sentinel(users, "first_name")?;
        let users = require_length(users, "user_uuid", UUID_LEN)?;

        let users = users.map_column("address", |cell| match cell {
            Cell::Text(address) => Cell::Text(address.replace("\r\n", " ").replace('\n', " ")),
            other => other,
        })?;

        let users = parse_dates(users, "date_of_birth")?;
        let users = parse_dates(users, "join_date")?;

        let users = if self.drop_birth_after_join {
            drop_birth_after_join(users)?
        } else {
            users
        };

        let users = users.map_column("country_code", |cell| {
            if cell.is_text("GGB") {
                Cell::from("GB")
            } else {
                cell
            }
        })?;

        normalize_phone_numbers(users)
    }
}

impl Transformer for UserCleaner {
    fn transform(&self, table: Table) -> Result<Table> {
        Ok(self.clean(table)?)
    }
}

fn drop_birth_after_join(users: Table) -> Result<Table, TableError> {
    let births = users.column("date_of_birth")?.values();
    let joins = users.column("join_date")?.values();
    let mask: Vec<bool> = births
        .iter()
        .zip(joins)
        .map(|(birth, join)| match (calendar_date(birth), calendar_date(join)) {
            (Some(birth), Some(join)) => birth <= join,
            _ => true,
        })
        .collect();
    let before = users.num_rows();
    let users = users.filter_rows(&mask);
    log::debug!(
        "Dropped {} row(s) born after joining",
        before - users.num_rows()
    );
    Ok(users)
}

fn normalize_phone_numbers(users: Table) -> Result<Table, TableError> {
    let countries: Vec<Option<String>> = users
        .column("country_code")?
        .values()
        .iter()
        .map(|cell| cell.as_str().map(str::to_string))
        .collect();

    users.try_map_column("phone_number", |row, cell| {
        Ok::<_, TableError>(match cell.render() {
            Some(raw) => Cell::Text(normalize_phone_number(
                &raw,
                countries.get(row).and_then(|c| c.as_deref()),
            )),
            None => Cell::Null,
        })
    })
}

/// Normalize a phone number for its country.
///
/// Dialling prefixes (`+1`, `+44`, `+49`) and extensions are removed, then
/// every non-digit. US numbers keep their last 10 digits; GB numbers get a
/// leading `0` when missing.
pub fn normalize_phone_number(raw: &str, country_code: Option<&str>) -> String {
    let stripped = PHONE_PREFIX_OR_EXTENSION.replace_all(raw, "");
    let digits: String = stripped.chars().filter(char::is_ascii_digit).collect();

    match country_code {
        Some("US") if digits.len() > 10 => digits[digits.len() - 10..].to_string(),
        Some("GB") if !digits.is_empty() && !digits.starts_with('0') => format!("0{}", digits),
        _ => digits,
    }
}
