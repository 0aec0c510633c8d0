//! Common regex patterns for vendor cost document extraction.
//!
//! Digits, letters and word boundaries are ASCII-only: `\d` and `\b` in
//! Unicode mode would accept Arabic-Indic digits and treat accented letters
//! as word characters.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Money: thousands grouped with commas, exactly two decimals (1,234.56)
    pub static ref MONEY: Regex = Regex::new(
        r"(?-u:\b)[0-9]{1,3}(?:,[0-9]{3})*\.[0-9]{2}(?-u:\b)"
    ).unwrap();

    // US dates (MM/DD/YYYY)
    pub static ref DATE_MDY: Regex = Regex::new(
        r"([0-9]{2})/([0-9]{2})/([0-9]{4})"
    ).unwrap();

    pub static ref DATE_MDY_LINE: Regex = Regex::new(
        r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$"
    ).unwrap();

    // Currency code on a line of its own
    pub static ref CURRENCY_LINE: Regex = Regex::new(
        r"^[A-Z]{3}$"
    ).unwrap();

    // Leading material code on an item line ("1234567 Widget Subscription")
    pub static ref ITEM_CODE_PREFIX: Regex = Regex::new(
        r"^[0-9]{5,}\s+"
    ).unwrap();

    pub static ref DIGITS_ONLY: Regex = Regex::new(
        r"^[0-9]+$"
    ).unwrap();

    pub static ref UPPER_THEN_DIGIT: Regex = Regex::new(
        r"[A-Z].*[0-9]"
    ).unwrap();

    pub static ref TOTAL_WITH_TAX: Regex = Regex::new(
        r"(?i-u)total amount with tax"
    ).unwrap();

    pub static ref TOTAL_OR_SHIPMENT: Regex = Regex::new(
        r"(?i-u)total amount with tax|shipment"
    ).unwrap();

    // Serial numbers: 13 or 17 alphanumerics
    pub static ref SERIAL_SHAPE: Regex = Regex::new(
        r"^(?:[A-Za-z0-9]{13}|[A-Za-z0-9]{17})$"
    ).unwrap();

    pub static ref SERIAL_BEFORE_MONEY: Regex = Regex::new(
        r"([A-Za-z0-9]{13}|[A-Za-z0-9]{17})\s+[0-9]{1,3}(?:,[0-9]{3})*\.[0-9]{2}"
    ).unwrap();

    pub static ref SHIPMENT: Regex = Regex::new(
        r"(?i-u)shipment"
    ).unwrap();

    // Address lines
    pub static ref STREET_KEYWORD: Regex = Regex::new(
        r"(?i-u)\b(?:st|street|ave|avenue|rd|road|blvd|drive|dr|hwy|highway|ln|lane)\b"
    ).unwrap();

    pub static ref CITY_STATE: Regex = Regex::new(
        r",\s*[A-Z]{2}(?-u:\b)"
    ).unwrap();

    pub static ref CITY_STATE_ZIP: Regex = Regex::new(
        r"(?-u:\b)[A-Za-z]{2}(?-u:\b)\s[0-9]{5}(?:-[0-9]{4})?$"
    ).unwrap();

    pub static ref STATE_SUFFIX: Regex = Regex::new(
        r"\s+[A-Z]{2}(?-u:\b).*$"
    ).unwrap();

    // Anything outside the name-matching alphabet
    pub static ref NON_ALPHANUMERIC: Regex = Regex::new(
        r"[^a-z0-9]+"
    ).unwrap();
}
