// TOML config adapter - Configuration layer loaded from TOML files

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::config_initialization::ConfigOverrides;
use crate::domain::errors::*;

/// Name of the table holding chapsplit settings
const SECTION: &str = "chapsplit";

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    chapsplit: Option<ConfigOverrides>,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Create new TOML config adapter
    pub fn new() -> Self {
        Self
    }

    /// Load the `[chapsplit]` table of a config file
    pub fn load_file(&self, path: &Path) -> Result<ConfigOverrides, DomainError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::FsFail(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let overrides = self.parse(&content)?;
        info!("Loaded configuration from: {}", path.display());
        Ok(overrides)
    }

    /// Parse TOML text; a file without the `[chapsplit]` table contributes nothing
    pub fn parse(&self, toml_content: &str) -> Result<ConfigOverrides, DomainError> {
        let parsed: ConfigFile = toml::from_str(toml_content).map_err(|e| {
            DomainError::BadArgs(format!("Failed to parse TOML config [{}]: {}", SECTION, e))
        })?;
        Ok(parsed.chapsplit.unwrap_or_default())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}
