//! Field extraction for the modern invoice layout.
//!
//! Each page is an independent invoice. Fields are found by exact label lines
//! and short positional scans around them.

use tracing::trace;

use crate::models::cost_item::{CostStyle, ParsedCostItem, DEFAULT_CURRENCY};

use super::rules::patterns::{
    CURRENCY_LINE, DATE_MDY_LINE, DIGITS_ONLY, ITEM_CODE_PREFIX, TOTAL_OR_SHIPMENT, TOTAL_WITH_TAX,
    UPPER_THEN_DIGIT,
};
use super::rules::{
    contains_money, extract_city, is_address_line, is_serial_value, line_starting_with,
    line_value, parse_date, position_of, position_starting_with, split_lines, AmountExtractor,
};
use super::LayoutExtractor;

const RETAIL_MARKER: &str = "Retail";
const DOCUMENT_INFO: &str = "Document Information";
const CONTRACT_START: &str = "Contract Start Date:";
const CONTRACT_END: &str = "Contract End Date:";
const DUE_DATE: &str = "Due Date:";
const ITEMS_HEADER: &str = "Items Material Info";
const LICENSE_NUMBER: &str = "License Number:";
const MACHINE_SERIAL: &str = "Machine Serial Number:";
const ORDERED_BY: &str = "Ordered By:";
const SHIP_TO: &str = "Ship To:";

/// Lines above "Retail" searched for the customer name.
const RETAIL_LOOKBEHIND: usize = 5;
/// Lines after the items header searched for the description.
const DESCRIPTION_WINDOW: usize = 5;
/// Lines above "Ordered By:" searched for the requester.
const ORDERED_BY_LOOKBEHIND: usize = 8;

/// Label lines that never continue an item description.
const DESCRIPTION_STOP_LABELS: [&str; 4] =
    [LICENSE_NUMBER, MACHINE_SERIAL, CONTRACT_START, CONTRACT_END];

/// Extractor for the modern, one-invoice-per-page layout.
pub struct NewStyleExtractor {
    default_currency: String,
}

impl NewStyleExtractor {
    pub fn new() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Set the currency used when a page shows no currency code.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Extract the record for one page.
    pub fn extract_page(&self, text: &str) -> ParsedCostItem {
        let lines = split_lines(text);

        let retail_customer =
            position_of(&lines, RETAIL_MARKER).and_then(|idx| pick_retail_customer(&lines, idx));

        let invoice_number = position_of(&lines, DOCUMENT_INFO)
            .and_then(|idx| lines.get(idx + 1))
            .map(|l| l.to_string());

        let currency = lines
            .iter()
            .find(|l| CURRENCY_LINE.is_match(l))
            .map(|l| l.to_string())
            .unwrap_or_else(|| self.default_currency.clone());

        let description = position_starting_with(&lines, ITEMS_HEADER)
            .and_then(|idx| extract_item_description(&lines, idx));

        let serial_number = position_starting_with(&lines, MACHINE_SERIAL)
            .and_then(|idx| extract_serial_number(&lines, idx));

        let ordered_by =
            position_of(&lines, ORDERED_BY).and_then(|idx| pick_ordered_by(&lines, idx));

        let location = position_of(&lines, SHIP_TO).and_then(|idx| extract_city(&lines, idx));

        let mut item = ParsedCostItem::new(CostStyle::New, text);
        item.customer_name = retail_customer.clone();
        item.retail_customer = retail_customer;
        item.location = location;
        item.ordered_by = ordered_by;
        item.amount = AmountExtractor::new().extract_last_line_match(&lines);
        item.currency = currency;
        item.invoice_number = invoice_number;
        // This layout prints no order number; the license number stands in.
        item.order_number = line_value(&lines, LICENSE_NUMBER);
        item.description = description;
        item.serial_number = serial_number;
        item.contract_start = labeled_date(&lines, CONTRACT_START);
        item.contract_end = labeled_date(&lines, CONTRACT_END);
        item.due_date = labeled_date(&lines, DUE_DATE);

        trace!(
            invoice_number = ?item.invoice_number,
            customer = ?item.customer_name,
            "extracted new-style page"
        );
        item
    }
}

impl Default for NewStyleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutExtractor for NewStyleExtractor {
    fn extract_document(&self, pages: &[&str]) -> Vec<ParsedCostItem> {
        pages.iter().map(|page| self.extract_page(page)).collect()
    }
}

fn labeled_date(lines: &[&str], label: &str) -> Option<chrono::NaiveDate> {
    line_starting_with(lines, label).and_then(parse_date)
}

/// Customer name printed above the "Retail" marker, skipping address lines.
pub fn pick_retail_customer(lines: &[&str], retail_idx: usize) -> Option<String> {
    if retail_idx == 0 || retail_idx > lines.len() {
        return None;
    }

    let floor = retail_idx.saturating_sub(RETAIL_LOOKBEHIND);
    (floor..retail_idx)
        .rev()
        .map(|i| lines[i])
        .find(|candidate| !candidate.is_empty() && !is_address_line(candidate))
        .or_else(|| lines.get(retail_idx - 1).copied())
        .map(str::to_string)
}

/// Item description following the "Items Material Info" header.
///
/// Takes the first line carrying a leading material code (or the first line of
/// the window), strips the code, and appends one continuation line if present.
pub fn extract_item_description(lines: &[&str], items_idx: usize) -> Option<String> {
    let start = (items_idx + 1).min(lines.len());
    let end = (items_idx + 1 + DESCRIPTION_WINDOW).min(lines.len());
    let window = &lines[start..end];

    let item_line = window
        .iter()
        .copied()
        .find(|l| ITEM_CODE_PREFIX.is_match(l))
        .or_else(|| window.first().copied())?;
    let first = ITEM_CODE_PREFIX.replace(item_line, "");
    let first = first.trim();

    let next = window.iter().copied().find(|l| {
        *l != item_line
            && !DESCRIPTION_STOP_LABELS.iter().any(|label| l.starts_with(label))
            && !contains_money(l)
    });

    match next {
        Some(next) if !next.starts_with(ITEMS_HEADER) => {
            Some(format!("{} {}", first, next).trim().to_string())
        }
        _ if first.is_empty() => None,
        _ => Some(first.to_string()),
    }
}

/// Serial number on or after the "Machine Serial Number:" line.
pub fn extract_serial_number(lines: &[&str], serial_idx: usize) -> Option<String> {
    let line = *lines.get(serial_idx)?;
    let inline = line.strip_prefix(MACHINE_SERIAL).unwrap_or(line).trim();
    if !inline.is_empty() {
        return Some(inline.to_string());
    }

    lines
        .iter()
        .skip(serial_idx + 1)
        .find(|l| {
            !l.contains(':')
                && !contains_money(l)
                && !TOTAL_OR_SHIPMENT.is_match(l)
                && is_serial_value(l)
        })
        .map(|l| l.to_string())
}

/// Requester name near the "Ordered By:" label.
///
/// The value usually follows the label, but some pages print it above; the
/// immediate predecessor is the last resort.
pub fn pick_ordered_by(lines: &[&str], ordered_by_idx: usize) -> Option<String> {
    if let Some(after) = lines.get(ordered_by_idx + 1) {
        if is_ordered_by_value(after) {
            return Some(after.to_string());
        }
    }

    if ordered_by_idx == 0 || ordered_by_idx > lines.len() {
        return None;
    }

    let floor = ordered_by_idx.saturating_sub(ORDERED_BY_LOOKBEHIND);
    (floor..ordered_by_idx)
        .rev()
        .map(|i| lines[i])
        .find(|candidate| is_ordered_by_value(candidate))
        .or_else(|| lines.get(ordered_by_idx - 1).copied())
        .map(str::to_string)
}

/// Check whether a line can be a requester value.
///
/// Rejects currency codes, dates, bare numbers, sales order ids and the tax
/// total label; requires an uppercase letter followed somewhere by a digit.
pub fn is_ordered_by_value(value: &str) -> bool {
    if CURRENCY_LINE.is_match(value)
        || DATE_MDY_LINE.is_match(value)
        || DIGITS_ONLY.is_match(value)
        || value.starts_with("O-")
        || TOTAL_WITH_TAX.is_match(value)
    {
        return false;
    }
    UPPER_THEN_DIGIT.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn test_retail_customer_skips_address_lines() {
        let lines = ["Acme Corp", "PO Box 12", "450 Elm Street", "Retail"];
        assert_eq!(pick_retail_customer(&lines, 3), Some("Acme Corp".to_string()));
    }

    #[test]
    fn test_retail_customer_falls_back_to_predecessor() {
        let lines = ["10 Main St", "PO Box 12", "Retail"];
        assert_eq!(pick_retail_customer(&lines, 2), Some("PO Box 12".to_string()));
        assert_eq!(pick_retail_customer(&["Retail"], 0), None);
    }

    #[test]
    fn test_retail_customer_window() {
        let lines = ["Acme Corp", "1 A St", "2 B St", "3 C St", "4 D St", "5 E St", "Retail"];
        assert_eq!(pick_retail_customer(&lines, 6), Some("5 E St".to_string()));
    }

    #[test]
    fn test_retail_marker_is_case_sensitive() {
        let page = "Acme Corp\nRETAIL\nUSD";
        let item = NewStyleExtractor::new().extract_page(page);
        assert_eq!(item.retail_customer, None);
    }

    #[test]
    fn test_item_description_with_continuation() {
        let lines = [
            "Items Material Info",
            "1234567 Precision Ag Subscription",
            "Annual renewal",
            "License Number: LIC-9",
        ];
        assert_eq!(
            extract_item_description(&lines, 0),
            Some("Precision Ag Subscription Annual renewal".to_string())
        );
    }

    #[test]
    fn test_item_description_skips_labels_and_money() {
        let lines = [
            "Items Material Info",
            "1234567 Precision Ag Subscription",
            "License Number: LIC-9",
            "1,250.00",
        ];
        assert_eq!(
            extract_item_description(&lines, 0),
            Some("Precision Ag Subscription".to_string())
        );
    }

    #[test]
    fn test_item_description_without_code() {
        let lines = ["Items Material Info Qty Price", "Field Connect", "Items Material Info"];
        assert_eq!(extract_item_description(&lines, 0), Some("Field Connect".to_string()));
        assert_eq!(extract_item_description(&["Items Material Info"], 0), None);
    }

    #[test]
    fn test_serial_inline() {
        let lines = ["Machine Serial Number: 1RW6130XCNA123456"];
        assert_eq!(extract_serial_number(&lines, 0), Some("1RW6130XCNA123456".to_string()));
    }

    #[test]
    fn test_serial_on_following_line() {
        let lines = [
            "Machine Serial Number:",
            "Shipment 1234567890",
            "Total Amount with Tax",
            "1,250.00",
            "Device Serial Number: none",
            "1RW6130XCNA12",
        ];
        assert_eq!(extract_serial_number(&lines, 0), Some("1RW6130XCNA12".to_string()));
    }

    #[test]
    fn test_serial_missing() {
        let lines = ["Machine Serial Number:", "Annual Subscription"];
        assert_eq!(extract_serial_number(&lines, 0), None);
    }

    #[test]
    fn test_serial_scan_skips_lines_with_wrong_shape() {
        let lines = ["Machine Serial Number:", "Annual Subscription", "1RW6130XCNA12"];
        assert_eq!(extract_serial_number(&lines, 0), Some("1RW6130XCNA12".to_string()));
    }

    #[test]
    fn test_amount_ignores_non_ascii_word_boundaries() {
        let page = "Acme\nRetail\n5.00\nTotal\u{e9}1,234.56";
        let item = NewStyleExtractor::new().extract_page(page);
        assert_eq!(item.amount, Some(Decimal::from_str("1234.56").unwrap()));
    }

    #[test]
    fn test_ordered_by_value_classifier() {
        assert!(is_ordered_by_value("JSMITH01"));
        assert!(is_ordered_by_value("Jane Smith 4471"));
        assert!(!is_ordered_by_value("USD"));
        assert!(!is_ordered_by_value("01/15/2024"));
        assert!(!is_ordered_by_value("900123"));
        assert!(!is_ordered_by_value("O-55123"));
        assert!(!is_ordered_by_value("Total Amount with Tax 2"));
        assert!(!is_ordered_by_value("jane smith"));
    }

    #[test]
    fn test_ordered_by_prefers_following_line() {
        let lines = ["Ordered By:", "JSMITH01"];
        assert_eq!(pick_ordered_by(&lines, 0), Some("JSMITH01".to_string()));
    }

    #[test]
    fn test_ordered_by_scans_backward() {
        let lines = ["KJONES22", "USD", "01/15/2024", "Ordered By:", "Ship To:"];
        assert_eq!(pick_ordered_by(&lines, 3), Some("KJONES22".to_string()));
    }

    #[test]
    fn test_ordered_by_falls_back_to_predecessor() {
        let lines = ["nobody", "USD", "Ordered By:", "Ship To:"];
        assert_eq!(pick_ordered_by(&lines, 2), Some("USD".to_string()));
        assert_eq!(pick_ordered_by(&["Ordered By:"], 0), None);
    }

    #[test]
    fn test_extract_full_page() {
        let page = "\
Acme Corp
1200 Harvest Rd
Retail
Document Information
INV-1001
Ordered By:
JSMITH01
Ship To:
Acme Corp
1200 Harvest Rd
Ames, IA 50010
USD
Contract Start Date: 01/01/2024
Contract End Date: 12/31/2024
Due Date: 01/31/2024
Items Material Info
1234567 Precision Ag Subscription
Annual renewal
License Number: LIC-42
Machine Serial Number:
1RW6130XCNA123456
Device Serial Number
999.00
Total Amount with Tax
1,079.00";

        let item = NewStyleExtractor::new().extract_page(page);

        assert_eq!(item.style, CostStyle::New);
        assert_eq!(item.retail_customer.as_deref(), Some("Acme Corp"));
        assert_eq!(item.customer_name.as_deref(), Some("Acme Corp"));
        assert_eq!(item.legal_name, None);
        assert_eq!(item.org_name, None);
        assert_eq!(item.invoice_number.as_deref(), Some("INV-1001"));
        assert_eq!(item.ordered_by.as_deref(), Some("JSMITH01"));
        assert_eq!(item.location.as_deref(), Some("Ames"));
        assert_eq!(item.currency, "USD");
        assert_eq!(item.contract_start, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(item.contract_end, NaiveDate::from_ymd_opt(2024, 12, 31));
        assert_eq!(item.due_date, NaiveDate::from_ymd_opt(2024, 1, 31));
        assert_eq!(item.description.as_deref(), Some("Precision Ag Subscription Annual renewal"));
        assert_eq!(item.order_number.as_deref(), Some("LIC-42"));
        assert_eq!(item.serial_number.as_deref(), Some("1RW6130XCNA123456"));
        assert_eq!(item.amount, Some(Decimal::from_str("1079.00").unwrap()));
        assert_eq!(item.raw_text, page);
    }

    #[test]
    fn test_empty_page_still_yields_record() {
        let item = NewStyleExtractor::new().extract_page("");
        assert_eq!(item, ParsedCostItem::new(CostStyle::New, ""));
    }

    #[test]
    fn test_default_currency_override() {
        let item = NewStyleExtractor::new()
            .with_default_currency("CAD")
            .extract_page("Acme Corp\nRetail");
        assert_eq!(item.currency, "CAD");
    }
}
