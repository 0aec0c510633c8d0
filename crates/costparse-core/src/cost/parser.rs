//! Document-level parsing: style resolution, extractor dispatch and matching.

use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::matching::CustomerMatcher;
use crate::models::config::ExtractionConfig;
use crate::models::cost_item::{CostStyle, ParseResult, ParsedCostItem};

use super::new_style::NewStyleExtractor;
use super::old_style::OldStyleExtractor;
use super::style::{resolve_style, StyleOverride};
use super::LayoutExtractor;

/// Parses vendor cost documents into records.
pub struct CostParser {
    new_style: NewStyleExtractor,
    old_style: OldStyleExtractor,
}

impl CostParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            new_style: NewStyleExtractor::new(),
            old_style: OldStyleExtractor::new(),
        }
    }

    /// Create a parser from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_default_currency(&config.default_currency)
    }

    /// Set the currency reported when a document states none.
    pub fn with_default_currency(mut self, currency: &str) -> Self {
        self.new_style = self.new_style.with_default_currency(currency);
        self.old_style = self.old_style.with_default_currency(currency);
        self
    }

    fn extractor(&self, style: CostStyle) -> &dyn LayoutExtractor {
        match style {
            CostStyle::New => &self.new_style,
            CostStyle::Old => &self.old_style,
        }
    }

    /// Parse a document given as page texts.
    pub fn parse_pages<S: AsRef<str>>(&self, pages: &[S], style: StyleOverride) -> ParseResult {
        let start = Instant::now();
        let pages: Vec<&str> = pages.iter().map(|p| p.as_ref()).collect();

        let resolved = resolve_style(&pages.join("\n"), style);
        let items = self.extractor(resolved).extract_document(&pages);

        info!(
            "Parsed {} pages as {} style into {} records",
            pages.len(),
            resolved,
            items.len()
        );
        debug!("Extraction took {:?}", start.elapsed());

        ParseResult {
            style: resolved,
            items,
        }
    }

    /// Parse a document and link every record to the registry.
    pub fn parse_and_match<S: AsRef<str>>(
        &self,
        pages: &[S],
        style: StyleOverride,
        matcher: &CustomerMatcher,
    ) -> ParseResult {
        let result = self.parse_pages(pages, style);
        let items: Vec<ParsedCostItem> = result
            .items
            .into_iter()
            .map(|item| matcher.apply(item))
            .collect();

        let parsed = ParseResult {
            style: result.style,
            items,
        };
        info!(
            "Matched {} of {} records to customers",
            parsed.matched_count(),
            parsed.item_count()
        );
        parsed
    }

    /// Parse many documents in parallel, preserving input order.
    pub fn parse_documents<S>(
        &self,
        documents: &[Vec<S>],
        style: StyleOverride,
        matcher: Option<&CustomerMatcher>,
    ) -> Vec<ParseResult>
    where
        S: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|pages| match matcher {
                Some(matcher) => self.parse_and_match(pages, style, matcher),
                None => self.parse_pages(pages, style),
            })
            .collect()
    }
}

impl Default for CostParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Split plain text into pages on `separator`.
///
/// A trailing separator does not start an extra page.
pub fn split_pages<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    if separator.is_empty() {
        return vec![text];
    }
    let mut pages: Vec<&str> = text.split(separator).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}
