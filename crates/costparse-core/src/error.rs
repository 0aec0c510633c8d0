//! Error types for the costparse-core library.
//!
//! Extraction itself never fails; these cover misuse of the public surface
//! and configuration I/O.

use thiserror::Error;

/// Main error type for the costparse library.
#[derive(Error, Debug)]
pub enum CostParseError {
    /// A style selector other than `auto`, `new` or `old`.
    #[error("invalid document style {0:?}: expected one of auto, new, old")]
    InvalidStyle(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the costparse library.
pub type Result<T> = std::result::Result<T, CostParseError>;
