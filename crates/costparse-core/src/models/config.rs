//! Configuration structures for the cost parsing pipeline.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cost::style::StyleOverride;
use crate::error::{CostParseError, Result};
use crate::models::cost_item::DEFAULT_CURRENCY;

/// Form feed, the page break emitted by `pdftotext`.
pub const DEFAULT_PAGE_SEPARATOR: &str = "\u{000c}";

/// Main configuration for costparse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParseConfig {
    /// Extraction configuration.
    pub extraction: ExtractionConfig,

    /// Customer matching configuration.
    pub matching: MatchingConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Layout selection applied when none is given on the command line.
    pub style: StyleOverride,

    /// Currency reported when a document states none.
    pub default_currency: String,

    /// Separator between pages in plain-text inputs.
    pub page_separator: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            style: StyleOverride::Auto,
            default_currency: DEFAULT_CURRENCY.to_string(),
            page_separator: DEFAULT_PAGE_SEPARATOR.to_string(),
        }
    }
}

/// Customer matching configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Link records to registry customers.
    pub enabled: bool,

    /// Registry file used when none is given on the command line.
    pub registry: Option<PathBuf>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            registry: None,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print JSON output.
    pub pretty: bool,
}

impl CostParseConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| CostParseError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.page_separator.is_empty() {
            return Err(CostParseError::Config(
                "extraction.page_separator must not be empty".to_string(),
            ));
        }
        let currency = &self.extraction.default_currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(CostParseError::Config(format!(
                "extraction.default_currency must be a three-letter code, got {:?}",
                currency
            )));
        }
        Ok(())
    }
}
