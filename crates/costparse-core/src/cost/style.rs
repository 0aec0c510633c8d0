//! Document layout detection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CostParseError;
use crate::models::cost_item::CostStyle;

/// Marker printed only on legacy debit/credit memos.
pub const OLD_STYLE_MARKER: &str = "DEBIT/CREDIT MEMO";

/// Column label printed on modern invoices.
pub const NEW_STYLE_MARKER: &str = "Device Serial Number";

/// Caller-selected layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleOverride {
    /// Detect the layout from the document text.
    #[default]
    Auto,
    /// Force the modern invoice layout.
    New,
    /// Force the legacy memo layout.
    Old,
}

impl StyleOverride {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleOverride::Auto => "auto",
            StyleOverride::New => "new",
            StyleOverride::Old => "old",
        }
    }
}

impl FromStr for StyleOverride {
    type Err = CostParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(StyleOverride::Auto),
            "new" => Ok(StyleOverride::New),
            "old" => Ok(StyleOverride::Old),
            other => Err(CostParseError::InvalidStyle(other.to_string())),
        }
    }
}

impl fmt::Display for StyleOverride {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a document by its full text.
///
/// The memo marker wins over the invoice marker; unrecognized documents are
/// treated as the modern layout.
pub fn detect_style(text: &str) -> CostStyle {
    if text.contains(OLD_STYLE_MARKER) {
        return CostStyle::Old;
    }
    if text.contains(NEW_STYLE_MARKER) {
        return CostStyle::New;
    }
    CostStyle::New
}

/// Apply an override, falling back to detection for `Auto`.
///
/// Explicit styles are used as given, even when the text disagrees.
pub fn resolve_style(text: &str, style: StyleOverride) -> CostStyle {
    match style {
        StyleOverride::New => CostStyle::New,
        StyleOverride::Old => CostStyle::Old,
        StyleOverride::Auto => detect_style(text),
    }
}
