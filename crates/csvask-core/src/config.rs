//! Configuration schema (TOML file passed with `--config`)

use serde::Deserialize;
use std::path::Path;

use crate::ident::is_identifier;
use crate::schema::DEFAULT_TABLE_NAME;

/// Settings for reading the CSV file into the in-memory table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Name of the in-memory table
    pub table_name: String,

    /// Data rows sampled for type inference
    pub sample_rows: usize,

    /// Field delimiter (a single ASCII character)
    pub delimiter: char,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            sample_rows: 10,
            delimiter: ',',
        }
    }
}

impl LoaderConfig {
    /// Delimiter as the byte the CSV reader expects
    pub fn delimiter_byte(&self) -> u8 {
        // Validated as ASCII by `Config::validate`
        self.delimiter as u8
    }
}

/// Settings for the question translator
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Lowercase column names eligible for the bare "from <word>" filter
    pub filter_hints: Vec<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            filter_hints: vec!["city".to_string(), "grade".to_string(), "name".to_string()],
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Config {
    /// CSV loading
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Question translation
    #[serde(default)]
    pub translator: TranslatorConfig,
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(format!("{}: {}", path.display(), e)))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when one is given, otherwise use the defaults
    ///
    /// Nothing is read implicitly: without a path the table is always `data`.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Reject values the loader or translator cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.loader.sample_rows == 0 {
            return Err(ConfigError::Invalid(
                "loader.sample_rows must be at least 1".to_string(),
            ));
        }

        if !self.loader.delimiter.is_ascii() {
            return Err(ConfigError::Invalid(format!(
                "loader.delimiter must be a single ASCII character, got '{}'",
                self.loader.delimiter
            )));
        }

        if !is_identifier(&self.loader.table_name) {
            return Err(ConfigError::Invalid(format!(
                "loader.table_name '{}' is not a valid identifier",
                self.loader.table_name
            )));
        }

        Ok(())
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
