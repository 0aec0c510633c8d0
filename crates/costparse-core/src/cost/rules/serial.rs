//! Device and machine serial number heuristics.

use super::patterns::{SERIAL_BEFORE_MONEY, SERIAL_SHAPE, SHIPMENT};
use super::FieldExtractor;

/// Serial number extractor for amount lines.
///
/// Old-style memos print the serial right before the line price, e.g.
/// `1RW6130XCNA123456 1,250.00`.
pub struct SerialExtractor;

impl SerialExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SerialExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for SerialExtractor {
    type Output = String;

    fn extract(&self, line: &str) -> Option<Self::Output> {
        if let Some(caps) = SERIAL_BEFORE_MONEY.captures(line) {
            return Some(caps[1].to_string());
        }

        line.split_whitespace()
            .find(|token| is_serial_value(token))
            .map(str::to_string)
    }
}

/// Check whether a value has the shape of a serial number.
///
/// Internal whitespace is ignored; the remainder must be exactly 13 or 17
/// ASCII alphanumerics and must not mention "shipment".
pub fn is_serial_value(value: &str) -> bool {
    if SHIPMENT.is_match(value) {
        return false;
    }

    let compact: String = value.chars().filter(|c| !c.is_whitespace()).collect();
    SERIAL_SHAPE.is_match(&compact)
}
