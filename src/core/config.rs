//! Configuration for `Relevate`
//!
//! Settings live in a TOML file under the platform config directory. Values may
//! reference that directory as `$RELEVATE`, which is expanded on load.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compiled-in defaults; debug builds log more and seed demo data.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder for the config directory in config values
pub const DIR_VARIABLE: &str = "$RELEVATE";

/// Every key accepted by [`Config::get`], [`Config::set`] and [`Config::unset`]
pub const CONFIG_KEYS: [&str; 8] = [
    "level",
    "file",
    "verbose",
    "data_dir",
    "seed_demo",
    "exports_dir",
    "certificates_dir",
    "endpoint",
];

/// Errors raised while saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config could not be encoded as TOML
    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Config file or directory could not be written
    #[error("Failed to write configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path; empty logs to the console
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Where business data is kept
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per storage key
    #[serde(default)]
    pub data_dir: String,
    /// Start from the demo company when nothing is stored yet
    #[serde(default)]
    pub seed_demo: bool,
}

/// Output locations
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for training report CSV files
    #[serde(default)]
    pub exports_dir: String,
    /// Directory for rendered certificates
    #[serde(default)]
    pub certificates_dir: String,
}

/// Referral form settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferralConfig {
    /// Form endpoint URL
    #[serde(default)]
    pub endpoint: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Storage settings
    #[serde(default)]
    pub storage: StorageConfig,
    /// Output paths
    #[serde(default)]
    pub paths: PathsConfig,
    /// Referral settings
    #[serde(default)]
    pub referral: ReferralConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data directory
    pub data_dir: Option<String>,
    /// Override demo seeding
    pub seed_demo: Option<bool>,
    /// Override report output directory
    pub exports_dir: Option<String>,
    /// Override certificate output directory
    pub certificates_dir: Option<String>,
    /// Override referral endpoint
    pub endpoint: Option<String>,
}

/// Copy `default` into `value` when `value` is empty; reports whether it did
fn fill_empty(value: &mut String, default: &str) -> bool {
    if value.is_empty() && !default.is_empty() {
        default.clone_into(value);
        true
    } else {
        false
    }
}

impl Config {
    /// Get the `$RELEVATE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/relevate`
    /// - macOS: `~/Library/Application Support/relevate`
    /// - Windows: `%APPDATA%\relevate`
    #[must_use]
    pub fn get_relevate_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("relevate")
    }

    /// Get the user config file path (`config.toml`, or `dconfig.toml` in debug builds)
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_relevate_dir().join(CONFIG_FILE_NAME)
    }

    /// Fill empty fields from `defaults`, so upgrades pick up new settings
    /// without touching values the user has set.
    ///
    /// Returns `true` if any field changed.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let changed = [
            fill_empty(&mut self.logging.level, &defaults.logging.level),
            fill_empty(&mut self.logging.file, &defaults.logging.file),
            fill_empty(&mut self.storage.data_dir, &defaults.storage.data_dir),
            fill_empty(&mut self.paths.exports_dir, &defaults.paths.exports_dir),
            fill_empty(&mut self.paths.certificates_dir, &defaults.paths.certificates_dir),
            fill_empty(&mut self.referral.endpoint, &defaults.referral.endpoint),
        ];
        changed.contains(&true)
    }

    /// Apply CLI-provided overrides for this run only; nothing is saved
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(data_dir) = &overrides.data_dir {
            self.storage.data_dir.clone_from(data_dir);
        }
        if let Some(seed_demo) = overrides.seed_demo {
            self.storage.seed_demo = seed_demo;
        }
        if let Some(exports_dir) = &overrides.exports_dir {
            self.paths.exports_dir.clone_from(exports_dir);
        }
        if let Some(certificates_dir) = &overrides.certificates_dir {
            self.paths.certificates_dir.clone_from(certificates_dir);
        }
        if let Some(endpoint) = &overrides.endpoint {
            self.referral.endpoint.clone_from(endpoint);
        }
    }

    /// Replace `$RELEVATE` with the config directory
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_relevate_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Parse a TOML configuration string, expanding `$RELEVATE` in path
    /// values. Missing sections and fields take their empty defaults.
    ///
    /// # Errors
    /// Returns an error if the TOML cannot be parsed or doesn't match the schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.storage.data_dir = Self::expand_variables(&config.storage.data_dir);
        config.paths.exports_dir = Self::expand_variables(&config.paths.exports_dir);
        config.paths.certificates_dir = Self::expand_variables(&config.paths.certificates_dir);

        Ok(config)
    }

    /// Compiled-in default configuration
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The
    /// defaults are compiled into the binary, so this never happens in practice.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load the user config file, creating it from defaults on first run.
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_file_path())
    }

    /// Load configuration from `path`; see [`Config::load`]
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        let defaults = Self::from_defaults();

        if !path.exists() {
            if let Err(err) = defaults.save_to(path) {
                crate::warn!("Could not create config file {}: {}", path.display(), err);
            }
            return defaults;
        }

        let parsed = fs::read_to_string(path)
            .map_err(|err| err.to_string())
            .and_then(|content| Self::from_toml(&content).map_err(|err| err.to_string()));

        match parsed {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) {
                    if let Err(err) = config.save_to(path) {
                        crate::warn!("Could not update config file {}: {}", path.display(), err);
                    }
                }
                config
            }
            Err(err) => {
                crate::warn!("Ignoring unreadable config {}: {}", path.display(), err);
                defaults
            }
        }
    }

    /// Save to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save to `path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized or written
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Get a configuration value by key (see [`CONFIG_KEYS`]); dashes and
    /// underscores are interchangeable
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key.replace('-', "_").as_str() {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "data_dir" => Some(self.storage.data_dir.clone()),
            "seed_demo" => Some(self.storage.seed_demo.to_string()),
            "exports_dir" => Some(self.paths.exports_dir.clone()),
            "certificates_dir" => Some(self.paths.certificates_dir.clone()),
            "endpoint" | "referral_endpoint" => Some(self.referral.endpoint.clone()),
            _ => None,
        }
    }

    /// Set a configuration value by key. Call [`Config::save`] to persist.
    ///
    /// # Errors
    /// Returns an error for an unknown key, an unknown log level, or a
    /// boolean field given something other than `true`/`false`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        let parse_bool = |name: &str| {
            value
                .parse::<bool>()
                .map_err(|_| format!("Invalid boolean value for '{name}': '{value}'"))
        };

        match key.replace('-', "_").as_str() {
            "level" => {
                if crate::logger::Level::parse(value).is_none() {
                    return Err(format!("Invalid log level: '{value}'"));
                }
                self.logging.level = value.trim().to_ascii_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool("verbose")?,
            "data_dir" => self.storage.data_dir = Self::expand_variables(value),
            "seed_demo" => self.storage.seed_demo = parse_bool("seed_demo")?,
            "exports_dir" => self.paths.exports_dir = Self::expand_variables(value),
            "certificates_dir" => self.paths.certificates_dir = Self::expand_variables(value),
            "endpoint" | "referral_endpoint" => self.referral.endpoint = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset one value to its default. Call [`Config::save`] to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key.replace('-', "_").as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "data_dir" => self.storage.data_dir.clone_from(&defaults.storage.data_dir),
            "seed_demo" => self.storage.seed_demo = defaults.storage.seed_demo,
            "exports_dir" => self.paths.exports_dir.clone_from(&defaults.paths.exports_dir),
            "certificates_dir" => self
                .paths
                .certificates_dir
                .clone_from(&defaults.paths.certificates_dir),
            "endpoint" | "referral_endpoint" => {
                self.referral.endpoint.clone_from(&defaults.referral.endpoint);
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file; the next [`Config::load`] recreates it.
    /// Succeeds if there is no file.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Data directory as a path
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(&self.storage.data_dir)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[storage]")?;
        writeln!(f, "  data_dir = \"{}\"", self.storage.data_dir)?;
        writeln!(f, "  seed_demo = {}", self.storage.seed_demo)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  exports_dir = \"{}\"", self.paths.exports_dir)?;
        writeln!(f, "  certificates_dir = \"{}\"", self.paths.certificates_dir)?;

        writeln!(f, "\n[referral]")?;
        writeln!(f, "  endpoint = \"{}\"", self.referral.endpoint)?;

        Ok(())
    }
}
