//! Core library for vendor subscription cost documents.
//!
//! This crate provides:
//! - Layout detection for the two known vendor document styles
//! - Rule-based field extraction from pre-extracted page text
//! - Customer matching against a registry of known customers
//! - Cost record models and pipeline configuration

pub mod cost;
pub mod error;
pub mod matching;
pub mod models;

pub use cost::{CostParser, LayoutExtractor, NewStyleExtractor, OldStyleExtractor, StyleOverride};
pub use error::{CostParseError, Result};
pub use matching::CustomerMatcher;
pub use models::config::CostParseConfig;
pub use models::cost_item::{CostStyle, ParseResult, ParsedCostItem};
pub use models::customer::Customer;
