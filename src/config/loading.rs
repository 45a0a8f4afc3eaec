//! Configuration loading functionality.
//!
//! Resolves the configuration path, creates a default file on first run and
//! parses and validates TOML into a [`Config`].

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use super::Config;
use super::validation::validate_config;
use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME};

/// Explicit configuration file, set once at startup
static CONFIG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Set the configuration file for the current process.
/// This can only be called once, typically at startup.
/// Returns an error if already set.
pub fn set_config_path(path: Option<PathBuf>) -> Result<()> {
    CONFIG_PATH
        .set(path)
        .map_err(|_| anyhow::anyhow!("Configuration path already set"))
}

/// Get the custom configuration file if one was set.
pub fn get_custom_config_path() -> Option<PathBuf> {
    CONFIG_PATH.get().and_then(|p| p.clone())
}

/// Get the configuration file path.
///
/// Uses the explicit path if one was set, otherwise
/// `$XDG_CONFIG_HOME/gammacycle/gammacycle.toml`.
pub fn get_config_path() -> Result<PathBuf> {
    if let Some(custom) = get_custom_config_path() {
        return Ok(custom);
    }
    default_config_path()
}

/// The per-user configuration path, ignoring any explicit override.
pub fn default_config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Load configuration using automatic path detection.
///
/// Creates a default configuration file at the per-user location if none
/// exists. An explicit path that does not exist is an error.
pub fn load() -> Result<Config> {
    let config_path = get_config_path()?;

    if !config_path.exists() && get_custom_config_path().is_none() {
        super::builder::create_default_config(&config_path)
            .context("Failed to create default config during load")?;
        log_block_start!("Created default configuration");
        log_indented!("{}", config_path.display());
    }

    load_from_path(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path.display()))
}

/// Load configuration from a specific path.
///
/// This version does NOT create a default config if the path doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Config> {
    if !path.exists() {
        anyhow::bail!("Configuration file not found: {}", path.display());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    parse_config(&content)
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Parse and validate configuration text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).context("Failed to parse TOML")?;
    validate_config(&config)?;
    Ok(config)
}
