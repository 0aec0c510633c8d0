//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod input;
pub mod output;
pub mod parse;

use std::path::{Path, PathBuf};

use tracing::debug;

use costparse_core::CostParseConfig;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("costparse")
        .join("config.json")
}

/// Load the configuration from an explicit path, the default location, or
/// fall back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<CostParseConfig> {
    let config = match config_path {
        Some(path) => CostParseConfig::from_file(Path::new(path))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                CostParseConfig::from_file(&path)?
            } else {
                CostParseConfig::default()
            }
        }
    };

    config.validate()?;
    Ok(config)
}
