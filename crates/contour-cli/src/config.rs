//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (TOML/YAML/JSON)
//! - Command-line arguments, applied on top by the caller

use crate::cli::OutputFormat;
use crate::error::{Error, Result};
use crate::logging::LogFormat;
use contour_core::{TransformationContext, ValidationContext};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the project configuration
pub const PROJECT_CONFIG_FILE: &str = ".contour.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default validation policy
    pub validation: ValidationContext,

    /// Default transformation policy
    pub transformation: TransformationContext,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingSettings,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: OutputFormat,

    /// Use colored output by default
    pub color: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error); verbosity flags win
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: LogFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Human,
            color: true,
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase)
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;

        let config = match extension(path).as_deref() {
            Some("toml") => toml::from_str(&content)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            Some("json") => serde_json::from_str(&content)?,
            _ => {
                return Err(Error::InvalidFormat {
                    path: path.to_path_buf(),
                    expected: "TOML, YAML or JSON".to_string(),
                })
            }
        };

        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                tracing::debug!(path = %path.display(), "Using configuration file");
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        match file {
            Some(path) => Self::from_file(path),
            None => Self::load(),
        }
    }

    /// Get default configuration file paths to check, in order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(PROJECT_CONFIG_FILE),
            PathBuf::from(".contour.yaml"),
            PathBuf::from(".contour.json"),
        ];

        if let Some(dir) = Self::user_config_dir() {
            paths.push(dir.join("config.toml"));
            paths.push(dir.join("config.yaml"));
            paths.push(dir.join("config.json"));
        }

        paths
    }

    /// Per-user configuration directory
    pub fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("contour"))
    }

    /// Serialize as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize as TOML: {}", e)))
    }

    /// Save configuration to a file, format chosen by extension
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match extension(path).as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::to_string(self)?,
            Some("json") => serde_json::to_string_pretty(self)?,
            _ => self.to_toml()?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.validation.abort_early);
        assert!(config.transformation.trim_strings);
        assert_eq!(config.output.format, OutputFormat::Human);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn test_partial_toml_uses_defaults() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[validation]\nabort_early = false\n\n[output]\nformat = \"json-pretty\"\n",
        )?;

        let config = Config::from_file(&path)?;
        assert!(!config.validation.abort_early);
        assert!(config.transformation.trim_strings);
        assert_eq!(config.output.format, OutputFormat::JsonPretty);
        assert!(config.output.color);
        Ok(())
    }

    #[test]
    fn test_yaml_and_json() -> Result<()> {
        let dir = TempDir::new()?;
        let yaml = dir.path().join("config.yaml");
        std::fs::write(&yaml, "transformation:\n  trim_strings: false\nlogging:\n  format: json\n")?;
        let config = Config::from_file(&yaml)?;
        assert!(!config.transformation.trim_strings);
        assert_eq!(config.logging.format, LogFormat::Json);

        let json = dir.path().join("config.json");
        std::fs::write(&json, r#"{"logging": {"level": "debug"}}"#)?;
        let config = Config::from_file(&json)?;
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        Ok(())
    }

    #[test]
    fn test_save_round_trip() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("nested").join("config.toml");
        let mut config = Config::default();
        config.validation = ValidationContext::collect_all();
        config.save(&path)?;

        assert_eq!(Config::from_file(&path)?, config);
        Ok(())
    }

    #[test]
    fn test_unknown_extension_and_missing_file() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "x=1")?;
        assert!(matches!(Config::from_file(&path), Err(Error::InvalidFormat { .. })));

        let missing = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load_with_file(Some(&missing)),
            Err(Error::FileNotFound { .. })
        ));
        Ok(())
    }
}
