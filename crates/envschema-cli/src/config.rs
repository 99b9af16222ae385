//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - A TOML configuration file (.envschema.toml)
//! - Command-line arguments

use crate::error::{Error, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default project configuration file name
pub const PROJECT_CONFIG_FILE: &str = ".envschema.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Path settings
    pub paths: PathConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub format: String,

    /// Use colored output by default
    pub color: bool,

    /// Default verbosity level
    pub verbosity: u8,
}

/// Path configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Default .env file to read variables from
    pub env_file: Option<PathBuf>,

    /// Default schema file
    pub schema: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "human".to_string(),
            color: true,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Load configuration, preferring an explicit file over the project
    /// default. A missing project file is not an error.
    pub fn load_with_file(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::FileNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Self::load_file(path);
        }

        let project = Path::new(PROJECT_CONFIG_FILE);
        if project.exists() {
            return Self::load_file(project);
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .with_context(|| format!("invalid configuration in {}", path.display()))
            .map_err(|e| Error::config(format!("{:#}", e)))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output.format, "human");
        assert!(config.output.color);
        assert!(config.paths.env_file.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[output]\nformat = \"json\"\n\n[paths]\nenv_file = \".env.local\""
        )
        .unwrap();

        let config = Config::load_with_file(Some(file.path())).unwrap();
        assert_eq!(config.output.format, "json");
        assert_eq!(config.paths.env_file, Some(PathBuf::from(".env.local")));
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = Config::load_with_file(Some(Path::new("/nonexistent/envschema.toml")))
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not [valid toml").unwrap();
        let err = Config::load_with_file(Some(file.path())).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
