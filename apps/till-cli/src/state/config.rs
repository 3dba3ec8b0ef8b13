//! # Till Configuration
//!
//! Settings loaded once at startup and read-only afterwards.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     till checkout --catalog products.csv --promo CHIPS:1:1             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     TILL_STORE_NAME="Corner Shop"                                      │
//! │     TILL_CATALOG=/srv/till/products.csv                                │
//! │     TILL_PRINT_TIMESTAMP=true                                          │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/till/till.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.till.till/till.toml (macOS)      │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     "Grocery Store", no catalog, no timestamp, no promotions           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! store_name = "Corner Shop"
//! catalog_path = "/srv/till/products.csv"
//! print_timestamp = true
//!
//! [[promotions]]
//! product_id = "CHIPS"
//! buy = 1
//! free = 1
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use till_core::receipt::DEFAULT_STORE_NAME;
use till_core::{CoreError, Promotion};

// =============================================================================
// Errors
// =============================================================================

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file was named explicitly but doesn't exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file couldn't be read.
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    /// The file isn't valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but don't make sense.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Promotion Entries
// =============================================================================

/// One `[[promotions]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionConfig {
    pub product_id: String,
    pub buy: u32,
    pub free: u32,
}

impl PromotionConfig {
    /// Converts to a validated promotion.
    pub fn to_promotion(&self) -> Result<Promotion, CoreError> {
        Promotion::new(self.product_id.as_str(), self.buy, self.free)
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete till configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TillConfig {
    /// Printed in the receipt title.
    #[serde(default = "default_store_name")]
    pub store_name: String,

    /// Catalog file used when `--catalog` isn't given.
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,

    /// Print a `Date:` line under the receipt title.
    #[serde(default)]
    pub print_timestamp: bool,

    /// Promotions registered with every new checkout.
    #[serde(default)]
    pub promotions: Vec<PromotionConfig>,
}

fn default_store_name() -> String {
    DEFAULT_STORE_NAME.to_string()
}

impl Default for TillConfig {
    fn default() -> Self {
        TillConfig {
            store_name: default_store_name(),
            catalog_path: None,
            print_timestamp: false,
            promotions: Vec::new(),
        }
    }
}

impl TillConfig {
    /// Loads configuration from file, environment and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`till.toml`)
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist. The default path is optional.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading till config from file");
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("store_name must not be empty".into()));
        }

        for entry in &self.promotions {
            entry.to_promotion().map_err(|e| {
                ConfigError::Invalid(format!("promotion for '{}': {}", entry.product_id, e))
            })?;
        }

        Ok(())
    }

    /// The configured promotions, validated.
    pub fn promotions(&self) -> ConfigResult<Vec<Promotion>> {
        self.promotions
            .iter()
            .map(|entry| {
                entry
                    .to_promotion()
                    .map_err(|e| ConfigError::Invalid(e.to_string()))
            })
            .collect()
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from a key lookup (the process environment in
    /// production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("TILL_STORE_NAME") {
            debug!(store_name = %name, "Overriding store name from environment");
            self.store_name = name;
        }

        if let Some(path) = lookup("TILL_CATALOG") {
            debug!(catalog = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(flag) = lookup("TILL_PRINT_TIMESTAMP") {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.print_timestamp = true,
                "0" | "false" | "no" | "off" => self.print_timestamp = false,
                _ => warn!(value = %flag, "Unknown TILL_PRINT_TIMESTAMP value in environment"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "till", "till")
            .map(|dirs| dirs.config_dir().join("till.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = TillConfig::default();
        assert_eq!(config.store_name, "Grocery Store");
        assert!(config.catalog_path.is_none());
        assert!(!config.print_timestamp);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = TillConfig::from_toml(
            r#"
store_name = "Corner Shop"
catalog_path = "/srv/till/products.csv"
print_timestamp = true

[[promotions]]
product_id = "CHIPS"
buy = 1
free = 1

[[promotions]]
product_id = "CHOC"
buy = 2
free = 1
"#,
        )
        .unwrap();

        assert_eq!(config.store_name, "Corner Shop");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/srv/till/products.csv")));
        assert!(config.print_timestamp);

        let promotions = config.promotions().unwrap();
        assert_eq!(promotions.len(), 2);
        assert_eq!(promotions[1].product_id(), "CHOC");
        assert_eq!(promotions[1].buy(), 2);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = TillConfig::from_toml("print_timestamp = true").unwrap();
        assert_eq!(config.store_name, "Grocery Store");
        assert!(config.promotions.is_empty());
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = TillConfig::from_toml("store_name = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_rejects_zero_buy_promotion() {
        let config = TillConfig::from_toml(
            "[[promotions]]\nproduct_id = \"CHIPS\"\nbuy = 0\nfree = 1\n",
        )
        .unwrap();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validation_rejects_blank_store_name() {
        let config = TillConfig {
            store_name: "  ".to_string(),
            ..TillConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = TillConfig::default();
        config.apply_overrides(env(&[
            ("TILL_STORE_NAME", "Night Market"),
            ("TILL_CATALOG", "/tmp/catalog.csv"),
            ("TILL_PRINT_TIMESTAMP", "yes"),
        ]));

        assert_eq!(config.store_name, "Night Market");
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.csv")));
        assert!(config.print_timestamp);
    }

    #[test]
    fn test_unknown_timestamp_flag_is_ignored() {
        let mut config = TillConfig {
            print_timestamp: true,
            ..TillConfig::default()
        };
        config.apply_overrides(env(&[("TILL_PRINT_TIMESTAMP", "sometimes")]));
        assert!(config.print_timestamp);
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("till.toml");
        std::fs::write(&path, "store_name = \"File Store\"\n").unwrap();

        let config = TillConfig::from_file(&path).unwrap();
        assert_eq!(config.store_name, "File Store");
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TillConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
