//! Field extraction for the legacy debit/credit memo layout.
//!
//! A memo lists several billable entities, each introduced by a
//! `LEGAL NAME:` line. The document's lines are split into one block per
//! entity and every block becomes a record.

use std::ops::Range;

use tracing::{debug, trace};

use crate::models::cost_item::{CostStyle, ParsedCostItem, DEFAULT_CURRENCY};

use super::rules::{
    contains_money, extract_city, line_starting_with, line_value, parse_date,
    position_starting_with, split_lines, AmountExtractor, FieldExtractor, SerialExtractor,
};
use super::LayoutExtractor;

const LEGAL_NAME: &str = "LEGAL NAME:";
const ORGANIZATION: &str = "ORGANIZATION:";
const LOCAL_PRICE: &str = "LOCAL PRICE:";
const ORDER_NUMBER: &str = "ORDER NUMBER:";
const START_DATE: &str = "START DATE:";
const END_DATE: &str = "END DATE:";
const CHARGE_TO: &str = "CHARGE/CREDIT TO:";

/// Organization placeholder printed when the entity has none.
const NO_ORGANIZATION: &str = "n/a";

/// Extractor for the legacy, many-records-per-document memo layout.
pub struct OldStyleExtractor {
    default_currency: String,
}

impl OldStyleExtractor {
    pub fn new() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Set the currency reported on every record.
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    /// Extract one record per legal-name block from a document's lines.
    pub fn extract_lines(&self, lines: &[&str]) -> Vec<ParsedCostItem> {
        let location = position_starting_with(lines, CHARGE_TO)
            .and_then(|idx| extract_city(lines, idx));

        let blocks = block_ranges(lines);
        debug!("Found {} legal-name blocks in {} lines", blocks.len(), lines.len());

        blocks
            .into_iter()
            .map(|range| self.extract_block(&lines[range], location.clone()))
            .collect()
    }

    /// Extract the record for a single block.
    pub fn extract_block(&self, block: &[&str], location: Option<String>) -> ParsedCostItem {
        let legal_name = line_value(block, LEGAL_NAME);
        let org_name = line_value(block, ORGANIZATION);
        let customer_name = pick_customer_name(org_name.as_deref(), legal_name.as_deref());

        let amounts = AmountExtractor::new();

        let mut item = ParsedCostItem::new(CostStyle::Old, block.join("\n"));
        item.legal_name = legal_name;
        item.org_name = org_name;
        item.customer_name = customer_name;
        item.location = location;
        item.amount = line_starting_with(block, LOCAL_PRICE).and_then(|l| amounts.extract(l));
        item.currency = self.default_currency.clone();
        item.order_number = line_value(block, ORDER_NUMBER);
        item.description = order_description(block);
        item.serial_number = serial_from_amount_line(block);
        item.contract_start = line_value(block, START_DATE).as_deref().and_then(parse_date);
        item.contract_end = line_value(block, END_DATE).as_deref().and_then(parse_date);

        trace!(
            legal_name = ?item.legal_name,
            order_number = ?item.order_number,
            "extracted old-style block"
        );
        item
    }
}

impl Default for OldStyleExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutExtractor for OldStyleExtractor {
    /// Pages are concatenated; blocks may span page breaks.
    fn extract_document(&self, pages: &[&str]) -> Vec<ParsedCostItem> {
        let lines: Vec<&str> = pages.iter().flat_map(|page| split_lines(page)).collect();
        self.extract_lines(&lines)
    }
}

/// Line ranges of the legal-name blocks.
///
/// Each block runs from its `LEGAL NAME:` line up to the next one, the last
/// to the end of the document. Lines before the first label belong to no
/// block.
pub fn block_ranges(lines: &[&str]) -> Vec<Range<usize>> {
    let starts: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, l)| l.starts_with(LEGAL_NAME))
        .map(|(idx, _)| idx)
        .collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(lines.len());
            start..end
        })
        .collect()
}

/// Organization name unless it is missing or "n/a", else the legal name.
pub fn pick_customer_name(org_name: Option<&str>, legal_name: Option<&str>) -> Option<String> {
    match org_name {
        Some(org) if !org.eq_ignore_ascii_case(NO_ORGANIZATION) => Some(org.to_string()),
        _ => legal_name.map(str::to_string),
    }
}

/// The line printed right after "ORDER NUMBER:".
fn order_description(block: &[&str]) -> Option<String> {
    let idx = position_starting_with(block, ORDER_NUMBER)?;
    block.get(idx + 1).map(|l| l.to_string())
}

/// Serial number taken from the block's first money-bearing line.
pub fn serial_from_amount_line(block: &[&str]) -> Option<String> {
    let line = block.iter().copied().find(|l| contains_money(l))?;
    SerialExtractor::new().extract(line)
}
