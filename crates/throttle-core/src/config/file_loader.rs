//! File-based configuration loading

use super::model::ThrottleConfig;
use crate::error::{ThrottleError, ThrottleResult};
use std::fs;
use std::path::Path;

/// Load configuration from a file
///
/// TOML for `.toml` files, JSON for everything else.
/// Returns the default config if the file doesn't exist.
pub fn load_from_file(path: &Path) -> ThrottleResult<ThrottleConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        return Ok(ThrottleConfig::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ThrottleError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let config: ThrottleConfig = match path.extension().and_then(|s| s.to_str()) {
        Some("toml") => toml::from_str(&content)?,
        _ => serde_json::from_str(&content)?,
    };

    config.validate()?;
    Ok(config)
}
