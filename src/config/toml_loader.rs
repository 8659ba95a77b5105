//! TOML configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Load and deserialize a TOML file.
///
/// A missing file is treated as empty content, so `T` decides what an
/// absent file means (usually an empty collection through `#[serde(default)]`).
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
/// [`ConfigError::InvalidSyntax`] if it does not deserialize into `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let file = path.display().to_string();
    if !path.exists() {
        return parse(&file, "");
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: file.clone(),
        source,
    })?;

    parse(&file, &content)
}

fn parse<T: DeserializeOwned>(file: &str, content: &str) -> Result<T, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::InvalidSyntax {
        file: file.to_string(),
        message: e.message().to_string(),
    })
}
