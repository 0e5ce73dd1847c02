//! Configuration for the generator

use crate::validation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetgen.toml";

/// Excel refuses sheet names longer than this
const MAX_SHEET_NAME_LEN: usize = 31;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Invalid(String),
}

/// Main generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory whose subfolders are offered as output destinations
    pub resources_root: PathBuf,
    /// Name of the single worksheet written to every file
    pub sheet_name: String,
    /// Rows generated and appended per batch
    pub batch_size: usize,
    /// Display width of every column
    pub column_width: f64,
    /// Header row background, as `RRGGBB` hex
    pub header_fill: String,
    /// Values proposed by the interactive prompts
    pub defaults: PromptDefaults,
}

/// Defaults shown by the prompt sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptDefaults {
    pub target_mb: f64,
    pub max_rows: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            resources_root: PathBuf::from("src/main/resources"),
            sheet_name: "TestData".to_string(),
            batch_size: 1000,
            column_width: 15.0,
            header_fill: "E0E0E0".to_string(),
            defaults: PromptDefaults::default(),
        }
    }
}

impl Default for PromptDefaults {
    fn default() -> Self {
        Self {
            target_mb: 10.0,
            max_rows: 100_000,
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GeneratorConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check values that would otherwise fail deep inside generation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid(
                "batch_size must be greater than 0".to_string(),
            ));
        }
        if !(self.column_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "column_width must be positive, got {}",
                self.column_width
            )));
        }
        if self.sheet_name.trim().is_empty() || self.sheet_name.chars().count() > MAX_SHEET_NAME_LEN
        {
            return Err(ConfigError::Invalid(format!(
                "sheet_name must have between 1 and {} characters",
                MAX_SHEET_NAME_LEN
            )));
        }
        self.header_fill_rgb()?;

        validation::check_target_mb(self.defaults.target_mb).map_err(|e| {
            ConfigError::Invalid(format!("defaults.target_mb: {}", e))
        })?;
        validation::check_max_rows(self.defaults.max_rows).map_err(|e| {
            ConfigError::Invalid(format!("defaults.max_rows: {}", e))
        })?;

        Ok(())
    }

    /// Header fill parsed into a `0xRRGGBB` value
    pub fn header_fill_rgb(&self) -> Result<u32, ConfigError> {
        let hex = self.header_fill.trim_start_matches('#');
        if hex.len() != 6 {
            return Err(ConfigError::Invalid(format!(
                "header_fill must be a 6 digit hex color, got '{}'",
                self.header_fill
            )));
        }
        u32::from_str_radix(hex, 16).map_err(|_| {
            ConfigError::Invalid(format!(
                "header_fill must be a 6 digit hex color, got '{}'",
                self.header_fill
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GeneratorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.batch_size, 1000);
        assert_eq!(config.sheet_name, "TestData");
        assert_eq!(config.header_fill_rgb().unwrap(), 0xE0E0E0);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
resources_root = "/tmp/bench"
batch_size = 250

[defaults]
max_rows = 5000
"#
        )
        .unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.resources_root, PathBuf::from("/tmp/bench"));
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.defaults.max_rows, 5000);
        assert_eq!(config.defaults.target_mb, 10.0);
        assert_eq!(config.column_width, 15.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut config = GeneratorConfig::default();
        config.batch_size = 0;
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.header_fill = "#GGGGGG".to_string();
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.header_fill = "#FFE0E0".to_string();
        assert!(config.validate().is_ok());

        let mut config = GeneratorConfig::default();
        config.sheet_name = "x".repeat(32);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::default();
        config.defaults.target_mb = 2000.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "batch_size = \"many\"").unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
