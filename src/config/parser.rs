use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;
use validator::Validate;

use super::models::{ConfigDocument, HeraldConfig};
use crate::constants;

/// Errors that can occur during configuration parsing
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to open config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Configuration validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

/// Resolves the configuration file path: the `HERALD_CONFIG_FILE` environment
/// variable when set, otherwise a `config.yaml` in the working directory
pub fn default_config_path() -> PathBuf {
    std::env::var(constants::config::CONFIG_FILE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(constants::config::DEFAULT_CONFIG_FILE))
}

/// Loads and validates the Herald configuration
///
/// Unresolvable cross references (a deployment naming an unknown chain or ABI
/// type) are not rejected here; they are skipped with a diagnostic when the
/// subscription plan is built.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<HeraldConfig, ConfigError> {
    // Open the configuration file
    let mut file = File::open(&config_path).map_err(ConfigError::FileError)?;

    // Read the file content
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(ConfigError::FileError)?;

    // Parse YAML
    let document: ConfigDocument =
        serde_yaml::from_str(&content).map_err(ConfigError::ParseError)?;
    let config = document.config;

    // Validate the configuration
    config.validate().map_err(ConfigError::ValidationError)?;

    Ok(config)
}
