// Configuration file parser

//! Configuration file parsing and validation
//!
//! This module handles loading the TOML configuration file, validating its
//! contents, and reading the main-interface file that names the interface to
//! watch.

use crate::error::Error;
use crate::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Longest interface name the kernel accepts (IFNAMSIZ minus the NUL)
const MAX_INTERFACE_NAME_LEN: usize = 15;

/// Load configuration from TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = fs::read_to_string(path.as_ref()).context("Failed to read config file")?;

    let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

    validate_config(&config)?;
    Ok(config)
}

/// Load configuration, falling back to defaults when an implicit path is absent
///
/// An explicitly requested file must exist; the default location is optional.
pub fn load_config_or_default<P: AsRef<Path>>(path: P, explicit: bool) -> Result<Config> {
    let path = path.as_ref();
    if !explicit && !path.exists() {
        let config = Config::default();
        validate_config(&config)?;
        return Ok(config);
    }
    load_config(path)
}

/// Validate configuration values
pub fn validate_config(config: &Config) -> Result<()> {
    let general = &config.general;

    if general.poll_interval == 0 {
        anyhow::bail!("poll_interval must be > 0");
    }

    if general.template.as_os_str().is_empty() {
        anyhow::bail!("template cannot be empty");
    }

    if general.output.as_os_str().is_empty() {
        anyhow::bail!("output cannot be empty");
    }

    match &general.interface {
        Some(iface) => validate_interface_name(iface)
            .with_context(|| format!("Invalid interface: {}", iface))?,
        None => {
            if general.interface_file.as_os_str().is_empty() {
                anyhow::bail!("interface_file cannot be empty when interface is not set");
            }
        }
    }

    Ok(())
}

/// Validates that an interface name could be a kernel interface name.
/// Allows alphanumeric characters, hyphens, underscores and dots (VLAN names).
pub fn validate_interface_name(name: &str) -> Result<()> {
    if name.is_empty() {
        anyhow::bail!("Interface name cannot be empty");
    }

    if name.len() > MAX_INTERFACE_NAME_LEN {
        anyhow::bail!(
            "Interface name '{}' is longer than {} bytes",
            name,
            MAX_INTERFACE_NAME_LEN
        );
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    {
        anyhow::bail!(
            "Interface name contains invalid characters: '{}'. Only alphanumeric, hyphens, underscores and dots are allowed",
            name
        );
    }

    Ok(())
}

/// Read the designated interface name from the first line of `path`
///
/// Called on every address fetch so that a reassigned interface is picked up
/// without a restart.
pub fn read_main_interface(path: &Path) -> crate::error::Result<String> {
    let file_error = |reason: String| Error::MainInterfaceFile {
        path: path.to_path_buf(),
        reason,
    };

    let contents = fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    let name = contents.lines().next().unwrap_or("").trim();

    if name.is_empty() {
        return Err(file_error("first line is empty".to_string()));
    }

    validate_interface_name(name).map_err(|e| file_error(e.to_string()))?;

    Ok(name.to_string())
}
