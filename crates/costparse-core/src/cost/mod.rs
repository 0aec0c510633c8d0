//! Cost record extraction from pre-extracted document text.

mod new_style;
mod old_style;
mod parser;
pub mod rules;
pub mod style;

pub use new_style::NewStyleExtractor;
pub use old_style::{block_ranges, OldStyleExtractor};
pub use parser::{split_pages, CostParser};
pub use style::{detect_style, resolve_style, StyleOverride};

use crate::models::cost_item::ParsedCostItem;

/// A layout-specific extraction strategy.
///
/// Implementations never fail: every page or block yields a record, with
/// unrecoverable fields left empty.
pub trait LayoutExtractor {
    /// Extract records from a document's pages, in document order.
    fn extract_document(&self, pages: &[&str]) -> Vec<ParsedCostItem>;
}
