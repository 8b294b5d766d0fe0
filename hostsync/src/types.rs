// Shared types

//! Shared data structures
//!
//! This module defines the address and identity types passed between the
//! reconciler and its collaborators, plus the configuration structures.

use serde::Deserialize;
use std::path::PathBuf;

/// Addresses bound to the designated interface at one point in time
///
/// IPv4 and IPv6 are kept as separate lists. Order follows the OS enumeration
/// order but carries no meaning; comparisons treat each list as a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterfaceAddresses {
    /// IPv4 addresses in textual form
    pub v4: Vec<String>,
    /// IPv6 addresses in textual form
    pub v6: Vec<String>,
}

impl InterfaceAddresses {
    /// Build from string slices
    pub fn new<S: Into<String>>(
        v4: impl IntoIterator<Item = S>,
        v6: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            v4: v4.into_iter().map(Into::into).collect(),
            v6: v6.into_iter().map(Into::into).collect(),
        }
    }
}

/// Hostname pair written next to every address record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    /// Full hostname as reported by the OS
    pub hostname: String,
    /// Hostname up to the first `.`
    pub short_hostname: String,
}

impl HostIdentity {
    /// Derive the short form by splitting on the first `.`
    pub fn from_hostname(hostname: impl Into<String>) -> Self {
        let hostname = hostname.into();
        let short_hostname = match hostname.split_once('.') {
            Some((short, _)) => short.to_string(),
            None => hostname.clone(),
        };
        Self {
            hostname,
            short_hostname,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// `[general]` table
    #[serde(default)]
    pub general: GeneralConfig,
}

/// General configuration options
#[derive(Debug, Deserialize, Clone)]
pub struct GeneralConfig {
    /// File whose first line names the interface to watch
    #[serde(default = "default_interface_file")]
    pub interface_file: PathBuf,
    /// Fixed interface name; takes precedence over `interface_file`
    #[serde(default)]
    pub interface: Option<String>,
    /// Jinja2 template rendered on change
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// File replaced with the rendered template
    #[serde(default = "default_output")]
    pub output: PathBuf,
    /// Seconds between polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval: u64,
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            interface_file: default_interface_file(),
            interface: None,
            template: default_template(),
            output: default_output(),
            poll_interval: default_poll_interval(),
            log_level: default_log_level(),
        }
    }
}

// Default values for configuration
fn default_interface_file() -> PathBuf {
    PathBuf::from("/etc/main_interface")
}

fn default_template() -> PathBuf {
    PathBuf::from("/etc/hosts_template.j2")
}

fn default_output() -> PathBuf {
    PathBuf::from("/etc/hosts")
}

fn default_poll_interval() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}
