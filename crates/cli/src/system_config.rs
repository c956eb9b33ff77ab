//! Configuration file discovery and loading
//!
//! Resolution order:
//! 1. Explicit `--config PATH`
//! 2. `$DBNC_CONFIG`
//! 3. Built-in defaults

use anyhow::{Context, Result};
use debounce::DebounceConfig;
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "DBNC_CONFIG";

/// Resolve which config file applies, if any
pub fn config_file_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    std::env::var_os(CONFIG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Load configuration, falling back to defaults when no file is configured
pub fn load(explicit: Option<&Path>) -> Result<DebounceConfig> {
    match config_file_path(explicit) {
        Some(path) => load_file(&path),
        None => {
            tracing::debug!("No config file configured, using defaults");
            Ok(DebounceConfig::default())
        }
    }
}

/// Load and validate a specific config file
pub fn load_file(path: &Path) -> Result<DebounceConfig> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config = DebounceConfig::from_toml_str(&contents)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    tracing::debug!(path = %path.display(), ?config, "Loaded config");
    Ok(config)
}

/// Example configuration text
pub fn example_config() -> &'static str {
    debounce::config::example_config()
}
