//! Structured cost records recovered from vendor subscription documents.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency assumed when a document does not state one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Document layout that produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostStyle {
    /// Modern invoice layout, one record per page.
    New,
    /// Legacy debit/credit memo layout, one record per legal-name block.
    Old,
}

impl CostStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostStyle::New => "new",
            CostStyle::Old => "old",
        }
    }
}

impl fmt::Display for CostStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single billable cost record.
///
/// Every field that could not be recovered is `None` and serializes as an
/// explicit `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCostItem {
    /// Layout the record was extracted from.
    pub style: CostStyle,

    /// Customer name printed above the "Retail" marker (new style).
    pub retail_customer: Option<String>,

    /// Text after "LEGAL NAME:" (old style).
    pub legal_name: Option<String>,

    /// Text after "ORGANIZATION:" (old style).
    pub org_name: Option<String>,

    /// Best display name for the customer.
    pub customer_name: Option<String>,

    /// City inferred from the ship-to or charge-to address.
    pub location: Option<String>,

    /// Requester named under "Ordered By:" (new style).
    pub ordered_by: Option<String>,

    /// Billed amount.
    pub amount: Option<Decimal>,

    /// Three-letter currency code.
    pub currency: String,

    pub invoice_number: Option<String>,

    pub order_number: Option<String>,

    /// Line-item description.
    pub description: Option<String>,

    /// Device or machine serial number.
    pub serial_number: Option<String>,

    pub contract_start: Option<NaiveDate>,

    pub contract_end: Option<NaiveDate>,

    pub due_date: Option<NaiveDate>,

    /// Source text the record was derived from.
    pub raw_text: String,

    /// Registry id assigned by the customer matcher.
    pub matched_customer_id: Option<String>,
}

impl ParsedCostItem {
    /// Create an empty record for the given layout and source span.
    pub fn new(style: CostStyle, raw_text: impl Into<String>) -> Self {
        Self {
            style,
            retail_customer: None,
            legal_name: None,
            org_name: None,
            customer_name: None,
            location: None,
            ordered_by: None,
            amount: None,
            currency: DEFAULT_CURRENCY.to_string(),
            invoice_number: None,
            order_number: None,
            description: None,
            serial_number: None,
            contract_start: None,
            contract_end: None,
            due_date: None,
            raw_text: raw_text.into(),
            matched_customer_id: None,
        }
    }

    /// Name used to look the record up in the customer registry.
    ///
    /// First non-empty of customer, retail, legal and organization names.
    pub fn match_candidate(&self) -> Option<&str> {
        [
            &self.customer_name,
            &self.retail_customer,
            &self.legal_name,
            &self.org_name,
        ]
        .into_iter()
        .filter_map(|name| name.as_deref())
        .find(|name| !name.is_empty())
    }

    /// Attach the matcher's result.
    pub fn with_match(mut self, customer_id: Option<String>) -> Self {
        self.matched_customer_id = customer_id;
        self
    }

    /// Whether the record was linked to a registry customer.
    pub fn is_matched(&self) -> bool {
        self.matched_customer_id.is_some()
    }
}

/// Records extracted from one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Layout used for the whole document.
    pub style: CostStyle,

    /// Records in page/block order.
    pub items: Vec<ParsedCostItem>,
}

impl ParseResult {
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn matched_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_matched()).count()
    }
}
