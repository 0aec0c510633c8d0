//! Postal address heuristics for US-style address blocks.

use super::patterns::{CITY_STATE, CITY_STATE_ZIP, STATE_SUFFIX, STREET_KEYWORD};

/// Number of lines (header included) searched for a city line.
pub const ADDRESS_LOOKAHEAD: usize = 10;

/// Check whether a line looks like a street or PO box address line.
pub fn is_address_line(value: &str) -> bool {
    if value.to_lowercase().contains("po box") {
        return true;
    }
    if value.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    STREET_KEYWORD.is_match(value)
}

/// Extract a city from the address block that starts at `header_idx`.
///
/// Prefers a `City, ST` line; otherwise takes the text before a trailing
/// `ST 12345` state/ZIP pair.
pub fn extract_city(lines: &[&str], header_idx: usize) -> Option<String> {
    let start = header_idx.min(lines.len());
    let end = (header_idx + ADDRESS_LOOKAHEAD).min(lines.len());
    let segment = &lines[start..end];

    if let Some(line) = segment.iter().find(|l| CITY_STATE.is_match(l)) {
        let city = line.split(',').next().unwrap_or("").trim();
        if !city.is_empty() {
            return Some(city.to_string());
        }
    }

    let line = segment.iter().find(|l| CITY_STATE_ZIP.is_match(l))?;
    let city = STATE_SUFFIX.replace(line, "");
    let city = city.trim();
    if city.is_empty() {
        None
    } else {
        Some(city.to_string())
    }
}
