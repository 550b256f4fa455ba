use crate::error::{CivicmapError, Result};
use crate::models::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::Path;

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// Paging limits enforced by the proximity search engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

/// Layered configuration for Civicmap
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub default_page_size: ConfigValue<usize>,
    pub max_page_size: ConfigValue<usize>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            default_page_size: ConfigValue::new(DEFAULT_PAGE_SIZE, ConfigSource::Default),
            max_page_size: ConfigValue::new(MAX_PAGE_SIZE, ConfigSource::Default),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| CivicmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| CivicmapError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(size) = file_config.default_page_size {
            self.default_page_size.update(size, ConfigSource::File);
        }

        if let Some(size) = file_config.max_page_size {
            self.max_page_size.update(size, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // CIVICMAP_DEFAULT_PAGE_SIZE
        if let Ok(size_str) = env::var("CIVICMAP_DEFAULT_PAGE_SIZE") {
            match parse_page_size(&size_str) {
                Ok(size) => self.default_page_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVICMAP_DEFAULT_PAGE_SIZE value '{}': expected positive integer",
                    size_str
                ),
            }
        }

        // CIVICMAP_MAX_PAGE_SIZE
        if let Ok(size_str) = env::var("CIVICMAP_MAX_PAGE_SIZE") {
            match parse_page_size(&size_str) {
                Ok(size) => self.max_page_size.update(size, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid CIVICMAP_MAX_PAGE_SIZE value '{}': expected positive integer",
                    size_str
                ),
            }
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(size) = overrides.default_page_size {
            self.default_page_size.update(size, ConfigSource::Cli);
        }

        if let Some(size) = overrides.max_page_size {
            self.max_page_size.update(size, ConfigSource::Cli);
        }
    }

    /// Resolve the effective paging limits
    pub fn search_settings(&self) -> Result<SearchSettings> {
        let default_page_size = self.default_page_size.value;
        let max_page_size = self.max_page_size.value;

        if max_page_size == 0 {
            return Err(CivicmapError::ConfigInvalid {
                key: "max_page_size".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        if default_page_size == 0 || default_page_size > max_page_size {
            return Err(CivicmapError::ConfigInvalid {
                key: "default_page_size".to_string(),
                reason: format!("must be between 1 and max_page_size ({})", max_page_size),
            });
        }

        Ok(SearchSettings { default_page_size, max_page_size })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "default_page_size".to_string(),
            (self.default_page_size.value.to_string(), self.default_page_size.source),
        );

        map.insert(
            "max_page_size".to_string(),
            (self.max_page_size.value.to_string(), self.max_page_size.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    default_page_size: Option<usize>,
    max_page_size: Option<usize>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub default_page_size: Option<usize>,
    pub max_page_size: Option<usize>,
}

/// Parse a page size from string
pub fn parse_page_size(s: &str) -> Result<usize> {
    match s.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(CivicmapError::ConfigInvalid {
            key: "page_size".to_string(),
            reason: format!("Invalid page size: {}. Use a positive integer", s),
        }),
    }
}
