//! Money amount extraction.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::MONEY;
use super::FieldExtractor;

/// Money amount extractor for `1,234.56` style values.
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }

    /// The last amount found scanning lines from the bottom up.
    ///
    /// Totals trail itemized detail on a page, so the last value in reading
    /// order is taken as the page amount.
    pub fn extract_last_line_match(&self, lines: &[&str]) -> Option<Decimal> {
        lines.iter().rev().find_map(|line| self.extract(line))
    }
}

impl Default for AmountExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = Decimal;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        MONEY.find(text).and_then(|m| parse_money(m.as_str()))
    }
}

/// Parse a comma-grouped amount (e.g., "1,234.56").
pub fn parse_money(s: &str) -> Option<Decimal> {
    let cleaned = s.trim().replace(',', "");
    Decimal::from_str(&cleaned).ok()
}

/// Whether the text contains a money value anywhere.
pub fn contains_money(text: &str) -> bool {
    MONEY.is_match(text)
}
