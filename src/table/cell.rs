//! Single table values

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use std::fmt;

/// One value in a table column.
///
/// `Null` is a true missing value. The sentinel string `"NULL"` found in
/// source data is a `Text` value and is handled by the cleaners.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Infer a cell from a raw text field (CSV pages, flat files).
    ///
    /// Empty fields are missing values; integers and floats are recognised,
    /// everything else stays text.
    pub fn infer(raw: &str) -> Self {
        if raw.is_empty() {
            return Cell::Null;
        }
        // Keep leading zeros and explicit signs of identifiers like phone numbers
        let zero_padded = raw.len() > 1 && raw.starts_with('0') && !raw.starts_with("0.");
        if zero_padded || raw.starts_with('+') {
            return Cell::Text(raw.to_string());
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Cell::Int(i);
        }
        // Integers too wide for i64 are identifiers, not measurements
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if digits.bytes().all(|b| b.is_ascii_digit()) {
            return Cell::Text(raw.to_string());
        }
        // "NaN"/"inf" parse as floats but are text in this data
        if raw.chars().any(|c| c.is_ascii_digit())
            && let Ok(f) = raw.parse::<f64>()
        {
            return Cell::Float(f);
        }
        Cell::Text(raw.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Borrow the text of a `Text` cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as text, `None` for missing values
    pub fn render(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// True when the cell is the given text value
    pub fn is_text(&self, value: &str) -> bool {
        self.as_str() == Some(value)
    }

    /// Number of characters in the rendered cell; missing values have none
    pub fn char_len(&self) -> Option<usize> {
        match self {
            Cell::Null => None,
            Cell::Text(s) => Some(s.chars().count()),
            other => Some(other.to_string().chars().count()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Bool(b) => write!(f, "{}", b),
            Cell::Int(i) => write!(f, "{}", i),
            Cell::Float(x) => write!(f, "{}", x),
            Cell::Text(s) => f.write_str(s),
            Cell::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Cell::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&Value> for Cell {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Cell::Null,
            Value::Bool(b) => Cell::Bool(*b),
            Value::Number(n) if n.is_u64() && n.as_i64().is_none() => Cell::Text(n.to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Cell::Int(i),
                None => n.as_f64().map(Cell::Float).unwrap_or(Cell::Null),
            },
            Value::String(s) => Cell::Text(s.clone()),
            nested => Cell::Text(nested.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_infer() {
        assert_eq!(Cell::infer(""), Cell::Null);
        assert_eq!(Cell::infer("42"), Cell::Int(42));
        assert_eq!(Cell::infer("-1.5"), Cell::Float(-1.5));
        assert_eq!(Cell::infer("NULL"), Cell::Text("NULL".to_string()));
        assert_eq!(Cell::infer("NaN"), Cell::Text("NaN".to_string()));
        assert_eq!(Cell::infer("12/25"), Cell::Text("12/25".to_string()));
    }

    #[test]
    fn test_infer_wide_integers_stay_text() {
        let wide = "349624180933183349624";
        assert_eq!(Cell::infer(wide), Cell::from(wide));
        assert_eq!(Cell::infer("-99999999999999999999"), Cell::from("-99999999999999999999"));
        assert_eq!(Cell::infer("1e3"), Cell::Float(1000.0));
        assert_eq!(Cell::from(&json!(18446744073709551615u64)), Cell::from("18446744073709551615"));
    }

    #[test]
    fn test_char_len() {
        assert_eq!(Cell::Null.char_len(), None);
        assert_eq!(Cell::from("13/25").char_len(), Some(5));
        assert_eq!(Cell::Int(4971858637664481).char_len(), Some(16));
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Cell::from(&json!(null)), Cell::Null);
        assert_eq!(Cell::from(&json!(7)), Cell::Int(7));
        assert_eq!(Cell::from(&json!(0.5)), Cell::Float(0.5));
        assert_eq!(Cell::from(&json!("N/A")), Cell::from("N/A"));
    }
}
