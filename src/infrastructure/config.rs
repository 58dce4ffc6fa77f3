//! Configuration infrastructure
//!
//! Application configuration is layered with the `config` crate:
//! 1. Built-in defaults
//! 2. An optional TOML/JSON/YAML file
//! 3. `CART_PARSER_*` environment variables (`__` separates nested keys,
//!    e.g. `CART_PARSER_LOGGING__LEVEL=debug`)

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::infrastructure::parsing::ParsingConfig;

pub const ENV_PREFIX: &str = "CART_PARSER";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config: {source}")]
    FileLoad {
        #[from]
        source: config::ConfigError,
    },

    #[error("Configuration validation failed: {message}")]
    Validation { message: String },
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub parsing: ParsingConfig,
}

/// Logging configuration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "error", "warn", "info", "debug", "trace"
    pub level: String,

    /// Enable JSON formatted logs
    pub json_format: bool,

    /// Enable console (stderr) output
    pub console_output: bool,

    /// Enable file output
    pub file_output: bool,

    /// Log file name inside the log directory
    pub file_name: String,

    /// Log directory; defaults to `logs/` next to the executable
    pub directory: Option<PathBuf>,

    /// Module-specific log level filters (e.g., "html5ever": "warn")
    pub module_filters: HashMap<String, String>,
}

pub mod defaults {
    pub const LOG_LEVEL: &str = "info";
    pub const LOG_JSON_FORMAT: bool = false;
    pub const LOG_CONSOLE_OUTPUT: bool = true;
    pub const LOG_FILE_OUTPUT: bool = false;
    pub const LOG_FILE_NAME: &str = "cart-page-parser.log";

    pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json_format: defaults::LOG_JSON_FORMAT,
            console_output: defaults::LOG_CONSOLE_OUTPUT,
            file_output: defaults::LOG_FILE_OUTPUT,
            file_name: defaults::LOG_FILE_NAME.to_string(),
            directory: None,
            module_filters: {
                let mut filters = HashMap::new();
                filters.insert("html5ever".to_string(), "warn".to_string());
                filters.insert("selectors".to_string(), "warn".to_string());
                filters
            },
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let levels = std::iter::once(&self.level).chain(self.module_filters.values());
        for level in levels {
            if !defaults::LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                return Err(ConfigError::Validation {
                    message: format!("unknown log level '{level}'"),
                });
            }
        }

        if !self.console_output && !self.file_output {
            return Err(ConfigError::Validation {
                message: "at least one of console_output/file_output must be enabled".to_string(),
            });
        }

        Ok(())
    }
}

impl AppConfig {
    /// Load defaults, then `path` (if any), then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            info!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a config file, applying environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::load(Some(path.as_ref()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.logging.validate()?;
        self.parsing
            .validate()
            .map_err(|e| ConfigError::Validation { message: e.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(extension: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(extension)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_without_file_yields_defaults() {
        let config = AppConfig::load(None).unwrap();
        assert_eq!(config.parsing, ParsingConfig::default());
    }

    #[test]
    fn test_file_overrides_selected_fields() {
        let file = write_config(
            ".toml",
            r#"
[logging]
level = "debug"

[parsing.cart_selectors]
item_price = "span.final_price"

[parsing.region_messages]
no_region_data = "Keine Regionen"
"#,
        );

        let config = AppConfig::from_file(file.path()).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.parsing.cart_selectors.item_price, "span.final_price");
        assert_eq!(
            config.parsing.cart_selectors.estimated_total,
            "div#cart_estimated_total"
        );
        assert_eq!(config.parsing.region_messages.no_region_data, "Keine Regionen");
    }

    #[test]
    fn test_invalid_selector_in_file_is_rejected() {
        let file = write_config(
            ".toml",
            r#"
[parsing.cart_selectors]
item_container = "div[class="
"#,
        );

        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(matches!(
            AppConfig::from_file("/nonexistent/cart-parser.toml"),
            Err(ConfigError::FileLoad { .. })
        ));
    }

    #[test]
    fn test_logging_validation() {
        let config = LoggingConfig {
            level: "loud".to_string(),
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..LoggingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
