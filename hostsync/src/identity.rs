// Host identity resolver

//! Host identity resolution
//!
//! Resolves the local hostname and its short form. The reconciler only asks
//! for it when a re-render is about to happen.

use crate::error::{Error, Result};
use crate::types::HostIdentity;
use sysinfo::System;

/// Source of the local host identity
pub trait HostResolver {
    /// Resolve the current hostname pair
    fn resolve(&self) -> Result<HostIdentity>;
}

/// Reads the hostname from the OS
#[derive(Debug, Default)]
pub struct SystemHostResolver;

impl HostResolver for SystemHostResolver {
    fn resolve(&self) -> Result<HostIdentity> {
        identity_from(System::host_name())
    }
}

/// Build an identity from an OS-reported hostname, rejecting blank names
fn identity_from(hostname: Option<String>) -> Result<HostIdentity> {
    match hostname {
        Some(name) if !name.trim().is_empty() => Ok(HostIdentity::from_hostname(name.trim())),
        _ => Err(Error::HostnameUnavailable),
    }
}
