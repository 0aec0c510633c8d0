//! Date extraction for US-formatted cost documents.

use chrono::NaiveDate;

use super::patterns::DATE_MDY;
use super::FieldExtractor;

/// `MM/DD/YYYY` date extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DATE_MDY.captures(text)?;
        let month: u32 = caps[1].parse().ok()?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Parse the first `MM/DD/YYYY` date in a string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    DateExtractor::new().extract(value)
}
