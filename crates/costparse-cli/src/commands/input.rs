//! Reading pre-extracted document text and customer registries from disk.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use costparse_core::cost::split_pages;
use costparse_core::models::customer::{registry_from_json, Customer};

/// Input extensions accepted by `parse` and `batch`.
pub const SUPPORTED_EXTENSIONS: [&str; 2] = ["txt", "json"];

/// JSON document layout: `{ "pages": ["...", "..."] }`.
#[derive(Deserialize)]
struct PagesDocument {
    pages: Vec<String>,
}

/// Whether a path has a supported input extension.
pub fn is_supported(path: &Path) -> bool {
    let ext = extension_of(path);
    SUPPORTED_EXTENSIONS.contains(&ext.as_str())
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a document's page texts.
///
/// `.txt` files are split into pages on `page_separator`; `.json` files hold
/// either `{"pages": [...]}` or a bare array of page strings.
pub fn load_document(path: &Path, page_separator: &str) -> anyhow::Result<Vec<String>> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)?;
    let pages = match extension_of(path).as_str() {
        "txt" => split_pages(&content, page_separator)
            .into_iter()
            .map(str::to_string)
            .collect(),
        "json" => parse_json_pages(&content)?,
        other => anyhow::bail!("Unsupported file format: {}", other),
    };

    debug!("Loaded {} pages from {}", pages.len(), path.display());
    Ok(pages)
}

fn parse_json_pages(content: &str) -> anyhow::Result<Vec<String>> {
    if let Ok(doc) = serde_json::from_str::<PagesDocument>(content) {
        return Ok(doc.pages);
    }
    serde_json::from_str::<Vec<String>>(content)
        .map_err(|e| anyhow::anyhow!("Expected {{\"pages\": [...]}} or an array of strings: {}", e))
}

/// Load a customer registry JSON file.
pub fn load_registry(path: &Path) -> anyhow::Result<Vec<Customer>> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read registry {}: {}", path.display(), e))?;
    let customers = registry_from_json(&content)
        .map_err(|e| anyhow::anyhow!("Invalid registry {}: {}", path.display(), e))?;

    debug!("Loaded {} customers from {}", customers.len(), path.display());
    Ok(customers)
}
