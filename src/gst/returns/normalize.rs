use std::sync::LazyLock;

use regex::Regex;

use crate::gst::returns::model::Cell;

static STATE_CODE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\s*-\s*").expect("valid state code pattern"));

static PLAIN_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-?\d+(?:\.\d+)?$").expect("valid number pattern"));

/// Converts a raw source value into the typed cell written under `header`.
///
/// Empty input becomes an empty text cell. Place-of-supply columns lose a
/// leading state code (`"07-Delhi"` becomes `"Delhi"`). Values that are plain
/// numbers once thousands separators are removed become numeric cells, while
/// everything else is kept as trimmed text with its commas intact.
pub fn normalize(header: &str, raw: &str) -> Cell {
    let value = raw.trim();
    if value.is_empty() {
        return Cell::text("");
    }

    let value = if is_place_of_supply(header) {
        STATE_CODE_PREFIX.replace(value, "").trim().to_string()
    } else {
        value.to_string()
    };

    parse_number(&value)
        .map(Cell::Number)
        .unwrap_or(Cell::Text(value))
}

fn is_place_of_supply(header: &str) -> bool {
    header.to_ascii_lowercase().contains("place of supply")
}

fn parse_number(value: &str) -> Option<f64> {
    let stripped = value.replace(',', "");
    if !PLAIN_NUMBER.is_match(&stripped) {
        return None;
    }
    stripped.parse().ok().filter(|number: &f64| number.is_finite())
}
