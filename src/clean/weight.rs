//! Product weight conversion to kilograms
//!
//! Weights arrive as strings in mixed units: `1.6kg`, `400g`, `12 x 100g`,
//! `500ml`, `16oz`. Rules are checked in order:
//!
//! 1. `kg` suffix: the number as-is
//! 2. contains ` x `: multi-pack `<count> x <amount><unit>`, product / 1000
//! 3. `g` or `ml` suffix, or contains `.`: all digits as an integer / 1000
//! 4. `oz` suffix: the number times [`KG_PER_OUNCE`]
//!
//! Anything else is unrecognised. Multi-packs are parsed as two plain
//! numbers; no other arithmetic is accepted.

use crate::table::Cell;

pub const KG_PER_OUNCE: f64 = 0.0283495;

/// Convert a weight string to kilograms, `None` when unrecognised
pub fn convert_product_weight(raw: &str) -> Option<f64> {
    let raw = raw.trim();

    if let Some(kg) = raw.strip_suffix("kg") {
        return kg.trim().parse().ok();
    }

    if let Some((count, amount)) = raw.split_once(" x ") {
        let count: f64 = count.trim().parse().ok()?;
        let amount: f64 = amount
            .trim()
            .trim_end_matches(|c: char| c.is_ascii_alphabetic())
            .parse()
            .ok()?;
        return Some(count * amount / 1000.0);
    }

    if raw.ends_with('g') || raw.ends_with("ml") || raw.contains('.') {
        let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
        let grams: u64 = digits.parse().ok()?;
        return Some(grams as f64 / 1000.0);
    }

    if let Some(oz) = raw.strip_suffix("oz") {
        let ounces: f64 = oz.trim().parse().ok()?;
        return Some(ounces * KG_PER_OUNCE);
    }

    None
}

/// Convert a weight cell, leaving unrecognised values as text
///
/// Missing values pass through unchanged.
pub fn convert_weight_cell(cell: Cell) -> Cell {
    let Some(raw) = cell.render() else {
        return cell;
    };
    match convert_product_weight(&raw) {
        Some(kg) => Cell::Float(kg),
        None => Cell::Text(raw),
    }
}
